//! Form Validation
//!
//! Field rules applied before a form is submitted to the API. Messages are
//! the literal strings shown next to the offending field.

use crate::shared::error::SharedError;
use crate::shared::forum::{LoginRequest, NewComment, NewThread, RegisterRequest};

pub const NAME_TOO_SHORT: &str = "Nama harus memiliki minimal 2 karakter.";
pub const EMAIL_INVALID: &str = "Harap masukkan alamat email yang valid.";
pub const PASSWORD_TOO_SHORT: &str = "Kata sandi harus memiliki minimal 6 karakter.";
pub const TITLE_TOO_SHORT: &str = "Judul thread minimal 3 karakter.";
pub const BODY_TOO_SHORT: &str = "Isi thread minimal 5 karakter.";
pub const COMMENT_TOO_SHORT: &str = "Komentar minimal 5 karakter.";

fn min_chars(field: &str, value: &str, min: usize, message: &str) -> Result<(), SharedError> {
    if value.chars().count() < min {
        return Err(SharedError::validation(field, message));
    }
    Ok(())
}

/// Loose `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.chars().count() >= 2,
        None => false,
    }
}

fn email(value: &str) -> Result<(), SharedError> {
    if !is_valid_email(value) {
        return Err(SharedError::validation("email", EMAIL_INVALID));
    }
    Ok(())
}

pub fn validate_register(request: &RegisterRequest) -> Result<(), SharedError> {
    min_chars("name", &request.name, 2, NAME_TOO_SHORT)?;
    email(&request.email)?;
    min_chars("password", &request.password, 6, PASSWORD_TOO_SHORT)
}

pub fn validate_login(request: &LoginRequest) -> Result<(), SharedError> {
    email(&request.email)?;
    min_chars("password", &request.password, 6, PASSWORD_TOO_SHORT)
}

/// Validates a new thread and drops a blank category
pub fn validate_new_thread(mut thread: NewThread) -> Result<NewThread, SharedError> {
    min_chars("title", &thread.title, 3, TITLE_TOO_SHORT)?;
    min_chars("body", &thread.body, 5, BODY_TOO_SHORT)?;
    if thread.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
        thread.category = None;
    }
    Ok(thread)
}

pub fn validate_new_comment(comment: &NewComment) -> Result<(), SharedError> {
    min_chars("content", &comment.content, 5, COMMENT_TOO_SHORT)
}
