pub mod change_password;
pub mod forgot_password;
pub mod login;
pub mod register;
pub mod reset_password;
pub mod verify_email;
pub mod verify_reset_code;

#[cfg(test)]
pub(crate) mod test_support;
