use crate::domain::SubmitterEmail;
use crate::util::NonEmptyString;

/// A validated contact form submission. Built from the raw payload at the
/// route boundary, relayed once, never stored.
#[derive(Debug)]
pub struct ContactMessage {
    pub name: NonEmptyString,
    pub email: SubmitterEmail,
    pub subject: NonEmptyString,
    pub message: NonEmptyString,
}
