use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use hrdesk_api::domain::types::Image;
use hrdesk_api::error::ApiError;
use hrdesk_api::usecase::image::{
    DeleteImageUseCase, ListImagesUseCase, Upload, UploadImageUseCase,
};
use hrdesk_api::usecase::profile::{
    DeleteProfileImageUseCase, GetProfileImageUseCase, ListUserCardsUseCase,
    UploadProfileImageUseCase,
};

use crate::helpers::{MockBlobStore, MockImageRepo, MockUserRepo, test_user};

fn upload(name: &str, bytes: &'static [u8]) -> Option<Upload> {
    Some(Upload {
        file_name: Some(name.to_owned()),
        bytes: Bytes::from_static(bytes),
    })
}

// ── Image store ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_blob_and_row_on_upload() {
    let images = MockImageRepo::empty();
    let blobs = MockBlobStore::empty();
    let uc = UploadImageUseCase {
        images: images.clone(),
        blobs: blobs.clone(),
    };

    let image = uc.execute(upload("cat.PNG", b"\x89PNG")).await.unwrap();
    assert!(image.path.ends_with(".png"), "{}", image.path);
    assert!(blobs.contains(&image.path));

    let listed = ListImagesUseCase { images }.execute().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, image.id);
}

#[tokio::test]
async fn should_reject_missing_or_empty_file() {
    let uc = UploadImageUseCase {
        images: MockImageRepo::empty(),
        blobs: MockBlobStore::empty(),
    };
    assert!(matches!(uc.execute(None).await, Err(ApiError::EmptyFile)));
    assert!(matches!(
        uc.execute(upload("empty.png", b"")).await,
        Err(ApiError::EmptyFile)
    ));
}

#[tokio::test]
async fn should_delete_blob_then_row() {
    let image = Image {
        id: Uuid::now_v7(),
        path: "a.png".to_owned(),
        created_at: Utc::now(),
    };
    let images = MockImageRepo::empty();
    images.images.lock().unwrap().push(image.clone());
    let blobs = MockBlobStore::with(&["a.png"]);

    let uc = DeleteImageUseCase {
        images: images.clone(),
        blobs: blobs.clone(),
    };
    uc.execute(image.id).await.unwrap();
    assert!(!blobs.contains("a.png"));
    assert!(images.images.lock().unwrap().is_empty());

    let again = uc.execute(image.id).await;
    assert!(matches!(again, Err(ApiError::ImageNotFound)));
}

#[tokio::test]
async fn should_delete_row_even_when_blob_is_gone() {
    let image = Image {
        id: Uuid::now_v7(),
        path: "lost.png".to_owned(),
        created_at: Utc::now(),
    };
    let images = MockImageRepo::empty();
    images.images.lock().unwrap().push(image.clone());

    DeleteImageUseCase {
        images: images.clone(),
        blobs: MockBlobStore::empty(),
    }
    .execute(image.id)
    .await
    .unwrap();
    assert!(images.images.lock().unwrap().is_empty());
}

// ── Profile images ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_previous_profile_image() {
    let mut user = test_user();
    user.profile_image = Some("old.jpg".to_owned());
    let users = MockUserRepo::new(vec![user.clone()]);
    let blobs = MockBlobStore::with(&["old.jpg"]);

    let key = UploadProfileImageUseCase {
        users: users.clone(),
        blobs: blobs.clone(),
    }
    .execute(user.id, upload("me.jpg", b"jpeg"))
    .await
    .unwrap();

    assert!(blobs.contains(&key));
    assert!(!blobs.contains("old.jpg"));
    assert_eq!(users.get(user.id).unwrap().profile_image, Some(key.clone()));

    let fetched = GetProfileImageUseCase { users }.execute(user.id).await.unwrap();
    assert_eq!(fetched, key);
}

#[tokio::test]
async fn should_remove_new_blob_when_profile_update_fails() {
    let mut user = test_user();
    user.profile_image = Some("old.jpg".to_owned());
    let blobs = MockBlobStore::with(&["old.jpg"]);

    let result = UploadProfileImageUseCase {
        users: MockUserRepo::failing_writes(vec![user.clone()]),
        blobs: blobs.clone(),
    }
    .execute(user.id, upload("me.jpg", b"jpeg"))
    .await;

    assert!(matches!(result, Err(ApiError::Internal(_))));
    let keys: Vec<String> = blobs.blobs.lock().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["old.jpg".to_owned()]);
}

#[tokio::test]
async fn should_check_user_before_file_on_profile_upload() {
    let uc = UploadProfileImageUseCase {
        users: MockUserRepo::empty(),
        blobs: MockBlobStore::empty(),
    };
    let result = uc.execute(Uuid::now_v7(), None).await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));

    let user = test_user();
    let uc = UploadProfileImageUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        blobs: MockBlobStore::empty(),
    };
    let result = uc.execute(user.id, None).await;
    assert!(matches!(result, Err(ApiError::EmptyFile)));
}

#[tokio::test]
async fn should_report_missing_profile_image() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);

    let get = GetProfileImageUseCase {
        users: users.clone(),
    }
    .execute(user.id)
    .await;
    assert!(matches!(get, Err(ApiError::NoProfileImage)));

    let delete = DeleteProfileImageUseCase {
        users: users.clone(),
        blobs: MockBlobStore::empty(),
    }
    .execute(user.id)
    .await;
    assert!(matches!(delete, Err(ApiError::NoImageToDelete)));

    let unknown = GetProfileImageUseCase { users }
        .execute(Uuid::now_v7())
        .await;
    assert!(matches!(unknown, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn should_delete_profile_image_and_clear_reference() {
    let mut user = test_user();
    user.profile_image = Some("me.png".to_owned());
    let users = MockUserRepo::new(vec![user.clone()]);
    let blobs = MockBlobStore::with(&["me.png"]);

    DeleteProfileImageUseCase {
        users: users.clone(),
        blobs: blobs.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();

    assert!(!blobs.contains("me.png"));
    assert!(users.get(user.id).unwrap().profile_image.is_none());
}

#[tokio::test]
async fn should_list_user_cards_or_report_no_data() {
    let empty = ListUserCardsUseCase {
        users: MockUserRepo::empty(),
    }
    .execute()
    .await;
    assert!(matches!(empty, Err(ApiError::NoData)));

    let cards = ListUserCardsUseCase {
        users: MockUserRepo::new(vec![test_user()]),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(cards.len(), 1);
}
