mod contact_message;
mod submitter_email;

pub use contact_message::ContactMessage;
pub use submitter_email::SubmitterEmail;
