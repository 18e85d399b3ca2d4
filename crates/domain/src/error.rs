use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your comment")]
    EmptyComment,
    #[error("Blog title cannot be empty!")]
    EmptyTitle,
    #[error("Blog content cannot be empty!")]
    EmptyBlogContent,
    #[error("Please enter email")]
    EmptyEmail,
    #[error("Please enter password")]
    EmptyPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter old password")]
    EmptyOldPassword,
    #[error("Please enter new password")]
    EmptyNewPassword,
    #[error("New password and confirm password do not match")]
    NewPasswordMismatch,
}
