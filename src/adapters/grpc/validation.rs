//! Request shape checks. Run before any call into the `Auth` capability.
//!
//! Each validator reports only the first failing field, in declaration order.

use super::proto::{IsAdminRequest, LoginRequest, RegisterRequest};
use tonic::Status;

pub fn validate_login(req: &LoginRequest) -> Result<(), Status> {
    if req.email.is_empty() {
        return Err(Status::invalid_argument("empty email"));
    }
    if req.password.is_empty() {
        return Err(Status::invalid_argument("empty password"));
    }
    if req.app_id == 0 {
        return Err(Status::invalid_argument("empty app id"));
    }
    Ok(())
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), Status> {
    if req.email.is_empty() {
        return Err(Status::invalid_argument("invalid email"));
    }
    if req.password.is_empty() {
        return Err(Status::invalid_argument("invalid password"));
    }
    Ok(())
}

pub fn validate_is_admin(req: &IsAdminRequest) -> Result<(), Status> {
    if req.user_id == 0 {
        return Err(Status::invalid_argument("invalid user_id"));
    }
    Ok(())
}
