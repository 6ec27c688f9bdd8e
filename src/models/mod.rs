pub mod submission;

pub use submission::{PreferredContact, Submission, SubmissionDraft};
