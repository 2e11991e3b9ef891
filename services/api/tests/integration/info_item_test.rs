use uuid::Uuid;

use hrdesk_api::domain::types::InfoItem;
use hrdesk_api::error::ApiError;
use hrdesk_api::usecase::info_item::{
    AddInfoItemUseCase, DeleteInfoItemUseCase, InfoItemInput, ListInfoItemsUseCase,
    UpdateInfoItemUseCase,
};

use crate::helpers::MockInfoItemRepo;

fn input(name: &str, detail: &str) -> InfoItemInput {
    InfoItemInput {
        name: name.to_owned(),
        detail: detail.to_owned(),
    }
}

fn item(name: &str) -> InfoItem {
    InfoItem {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        detail: format!("{name} detail"),
    }
}

#[tokio::test]
async fn should_report_no_data_for_empty_list() {
    let result = ListInfoItemsUseCase {
        items: MockInfoItemRepo::empty(),
    }
    .execute()
    .await;
    assert!(matches!(result, Err(ApiError::NoData)));
}

#[tokio::test]
async fn should_add_then_list_item() {
    let items = MockInfoItemRepo::empty();
    let added = AddInfoItemUseCase {
        items: items.clone(),
    }
    .execute(input("Holidays", "Office closed on public holidays"))
    .await
    .unwrap();

    let listed = ListInfoItemsUseCase { items }.execute().await.unwrap();
    assert_eq!(listed, vec![added]);
}

#[tokio::test]
async fn should_require_name_and_detail() {
    let uc = AddInfoItemUseCase {
        items: MockInfoItemRepo::empty(),
    };
    assert!(matches!(
        uc.execute(input("", "x")).await,
        Err(ApiError::MissingField("name"))
    ));
    assert!(matches!(
        uc.execute(input("x", "  ")).await,
        Err(ApiError::MissingField("detail"))
    ));
}

#[tokio::test]
async fn should_update_existing_item() {
    let existing = item("Parking");
    let items = MockInfoItemRepo::new(vec![existing.clone()]);

    let updated = UpdateInfoItemUseCase {
        items: items.clone(),
    }
    .execute(existing.id, Some(existing.id), input("Parking", "Level B2"))
    .await
    .unwrap();
    assert_eq!(updated.detail, "Level B2");
    assert_eq!(items.items.lock().unwrap()[0].detail, "Level B2");
}

#[tokio::test]
async fn should_check_id_mismatch_before_existence() {
    let uc = UpdateInfoItemUseCase {
        items: MockInfoItemRepo::empty(),
    };

    let result = uc
        .execute(Uuid::now_v7(), Some(Uuid::now_v7()), input("a", "b"))
        .await;
    assert!(matches!(result, Err(ApiError::IdMismatch)));

    let result = uc.execute(Uuid::now_v7(), None, input("a", "b")).await;
    assert!(matches!(result, Err(ApiError::IdMismatch)));

    let id = Uuid::now_v7();
    let result = uc.execute(id, Some(id), input("a", "b")).await;
    assert!(matches!(result, Err(ApiError::InfoItemNotFound)));
}

#[tokio::test]
async fn should_delete_item_once() {
    let existing = item("Canteen");
    let uc = DeleteInfoItemUseCase {
        items: MockInfoItemRepo::new(vec![existing.clone()]),
    };
    uc.execute(existing.id).await.unwrap();
    assert!(matches!(
        uc.execute(existing.id).await,
        Err(ApiError::InfoItemNotFound)
    ));
}
