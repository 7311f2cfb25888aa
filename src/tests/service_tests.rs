use crate::auth::guard::Operation;
use crate::core::errors::MedviewError;
use crate::core::models::image::{ImageLink, NO_FEEDBACK};
use crate::core::models::user::Role;
use crate::tests::create_test_context;

#[tokio::test]
async fn test_login_with_builtin_accounts() {
    let ctx = create_test_context().await;

    for (username, password, role) in [("doctor", "doctor123", Role::Doctor), ("student", "student123", Role::Student)] {
        let identity = ctx.service.authenticate(username, password).await.unwrap();
        assert_eq!(identity.username, username);
        assert_eq!(identity.role, role);
    }
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let ctx = create_test_context().await;

    for (username, password) in [
        ("doctor", "student123"),
        ("student", "doctor123"),
        ("student", ""),
        ("admin", "admin"),
        ("", ""),
    ] {
        let result = ctx.service.authenticate(username, password).await;
        assert!(matches!(result, Err(MedviewError::InvalidCredentials)), "{username}/{password}");
    }
}

#[tokio::test]
async fn test_upload_then_list_shows_placeholder() {
    let ctx = create_test_context().await;
    let student = ctx.service.authenticate("student", "student123").await.unwrap();

    let stored = ctx.service.upload_image(&student, Some("a.png"), b"png-bytes").await.unwrap();
    assert_eq!(stored, "a.png");
    assert_eq!(std::fs::read(ctx.config.upload_dir.join("a.png")).unwrap(), b"png-bytes");

    let listing = ctx.service.list_own_images(&student).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].filename, "a.png");
    assert_eq!(listing[0].feedback, NO_FEEDBACK);
}

#[tokio::test]
async fn test_upload_sanitizes_name_and_overwrites() {
    let ctx = create_test_context().await;
    let student = ctx.service.authenticate("student", "student123").await.unwrap();

    let stored = ctx
        .service
        .upload_image(&student, Some("../../chest x-ray.png"), b"v1")
        .await
        .unwrap();
    assert_eq!(stored, "chest_x-ray.png");
    assert!(!ctx.dir.path().join("chest_x-ray.png").exists());

    ctx.service
        .upload_image(&student, Some("chest x-ray.png"), b"v2")
        .await
        .unwrap();
    assert_eq!(std::fs::read(ctx.config.upload_dir.join("chest_x-ray.png")).unwrap(), b"v2");
    assert_eq!(ctx.service.list_own_images(&student).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_without_usable_name() {
    let ctx = create_test_context().await;
    let student = ctx.service.authenticate("student", "student123").await.unwrap();

    assert!(matches!(
        ctx.service.upload_image(&student, None, b"data").await,
        Err(MedviewError::MissingFile)
    ));
    assert!(matches!(
        ctx.service.upload_image(&student, Some(""), b"data").await,
        Err(MedviewError::MissingFile)
    ));
    assert!(matches!(
        ctx.service.upload_image(&student, Some("../.."), b"data").await,
        Err(MedviewError::InvalidFilename(_))
    ));
    assert!(ctx.service.list_own_images(&student).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_feedback_last_write_wins() {
    let ctx = create_test_context().await;
    let student = ctx.service.authenticate("student", "student123").await.unwrap();
    let doctor = ctx.service.authenticate("doctor", "doctor123").await.unwrap();
    ctx.service.upload_image(&student, Some("a.png"), b"img").await.unwrap();

    ctx.service
        .submit_feedback(&doctor, "a.png", "Looks healthy".to_string())
        .await
        .unwrap();
    assert_eq!(ctx.service.view_feedback(&student, "a.png").await.unwrap(), "Looks healthy");

    ctx.service
        .submit_feedback(&doctor, "a.png", "Follow up needed".to_string())
        .await
        .unwrap();
    assert_eq!(ctx.service.view_feedback(&student, "a.png").await.unwrap(), "Follow up needed");

    let listing = ctx.service.list_own_images(&student).await.unwrap();
    assert_eq!(listing[0].feedback, "Follow up needed");
}

#[tokio::test]
async fn test_feedback_for_missing_file_is_accepted() {
    let ctx = create_test_context().await;
    let student = ctx.service.authenticate("student", "student123").await.unwrap();
    let doctor = ctx.service.authenticate("doctor", "doctor123").await.unwrap();

    assert_eq!(ctx.service.view_feedback(&student, "ghost.png").await.unwrap(), NO_FEEDBACK);
    ctx.service
        .submit_feedback(&doctor, "ghost.png", "Nothing here".to_string())
        .await
        .unwrap();
    assert_eq!(ctx.service.view_feedback(&student, "ghost.png").await.unwrap(), "Nothing here");
    assert!(ctx.service.list_own_images(&student).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_doctor_listing_has_urls() {
    let ctx = create_test_context().await;
    let student = ctx.service.authenticate("student", "student123").await.unwrap();
    let doctor = ctx.service.authenticate("doctor", "doctor123").await.unwrap();
    ctx.service.upload_image(&student, Some("a.png"), b"1").await.unwrap();
    ctx.service.upload_image(&student, Some("b.jpg"), b"2").await.unwrap();

    let mut links = ctx.service.view_images(&doctor).await.unwrap();
    links.sort_by(|a, b| a.filename.cmp(&b.filename));
    assert_eq!(links, vec![ImageLink::for_file("a.png"), ImageLink::for_file("b.jpg")]);
    assert_eq!(links[0].url, "/uploads/a.png");
}

#[tokio::test]
async fn test_roles_are_enforced_by_service() {
    let ctx = create_test_context().await;
    let student = ctx.service.authenticate("student", "student123").await.unwrap();
    let doctor = ctx.service.authenticate("doctor", "doctor123").await.unwrap();

    assert!(matches!(
        ctx.service.upload_image(&doctor, Some("a.png"), b"x").await,
        Err(MedviewError::Forbidden(Operation::UploadImage))
    ));
    assert!(matches!(
        ctx.service.list_own_images(&doctor).await,
        Err(MedviewError::Forbidden(Operation::ListOwnImages))
    ));
    assert!(matches!(
        ctx.service.view_feedback(&doctor, "a.png").await,
        Err(MedviewError::Forbidden(Operation::ViewFeedback))
    ));
    assert!(matches!(
        ctx.service.view_images(&student).await,
        Err(MedviewError::Forbidden(Operation::ViewImages))
    ));
    assert!(matches!(
        ctx.service.submit_feedback(&student, "a.png", "hi".to_string()).await,
        Err(MedviewError::Forbidden(Operation::SubmitFeedback))
    ));
    assert!(!ctx.config.upload_dir.join("a.png").exists());
}
