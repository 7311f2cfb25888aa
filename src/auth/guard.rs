//! Role requirements for every protected operation, checked in one place.

use crate::core::errors::MedviewError;
use crate::core::models::session::Identity;
use crate::core::models::user::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    UploadImage,
    ListOwnImages,
    ViewImages,
    SubmitFeedback,
    ViewFeedback,
}

impl Operation {
    pub fn required_role(self) -> Role {
        match self {
            Operation::UploadImage | Operation::ListOwnImages | Operation::ViewFeedback => Role::Student,
            Operation::ViewImages | Operation::SubmitFeedback => Role::Doctor,
        }
    }

    /// Notice shown to a caller whose role does not match.
    pub fn denial_notice(self) -> &'static str {
        match self {
            Operation::UploadImage => "Only students can upload images.",
            Operation::ListOwnImages => "Only students can view their images.",
            Operation::ViewImages => "Only doctors can view images.",
            Operation::SubmitFeedback => "Only doctors can provide feedback.",
            Operation::ViewFeedback => "Only students can view feedback.",
        }
    }
}

pub fn authorize(identity: &Identity, operation: Operation) -> Result<(), MedviewError> {
    if identity.role == operation.required_role() {
        Ok(())
    } else {
        tracing::warn!(
            user = %identity.username,
            role = %identity.role,
            ?operation,
            "operation denied"
        );
        Err(MedviewError::Forbidden(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            username: role.to_string(),
            role,
        }
    }

    #[test]
    fn student_operations() {
        let student = identity(Role::Student);
        assert!(authorize(&student, Operation::UploadImage).is_ok());
        assert!(authorize(&student, Operation::ListOwnImages).is_ok());
        assert!(authorize(&student, Operation::ViewFeedback).is_ok());
        assert!(matches!(
            authorize(&student, Operation::ViewImages),
            Err(MedviewError::Forbidden(Operation::ViewImages))
        ));
        assert!(matches!(
            authorize(&student, Operation::SubmitFeedback),
            Err(MedviewError::Forbidden(Operation::SubmitFeedback))
        ));
    }

    #[test]
    fn doctor_operations() {
        let doctor = identity(Role::Doctor);
        assert!(authorize(&doctor, Operation::ViewImages).is_ok());
        assert!(authorize(&doctor, Operation::SubmitFeedback).is_ok());
        assert!(authorize(&doctor, Operation::UploadImage).is_err());
        assert!(authorize(&doctor, Operation::ListOwnImages).is_err());
        assert!(authorize(&doctor, Operation::ViewFeedback).is_err());
    }

    #[test]
    fn forbidden_error_displays_notice() {
        let err = authorize(&identity(Role::Doctor), Operation::UploadImage).unwrap_err();
        assert_eq!(err.to_string(), "Only students can upload images.");
    }
}
