pub mod submissions;

pub use submissions::SubmissionStore;
