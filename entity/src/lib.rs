pub mod session;
pub mod user;

/*
 An account is usable only once both gates are open:
 email_confirmed flips when the registrant follows the confirmation link,
 admin_approved flips when the approval link is followed.
 Neither flag ever goes back to false.
 */
