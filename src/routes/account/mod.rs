pub mod approve;
pub mod confirm;
pub mod login;
pub mod logout;
pub mod register;
