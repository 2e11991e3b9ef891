use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use hrdesk_api_schema::{images, info_items, leave_requests, otp_verifications, phone_grants, users};
use hrdesk_domain::leave::{LeaveDecision, LeaveStatus};

use crate::domain::repository::{
    GrantRepository, ImageRepository, InfoItemRepository, LeaveRepository, OtpRepository,
    UserRepository,
};
use crate::domain::types::{Image, InfoItem, LeaveRequest, OtpRecord, PhoneGrant, User};
use crate::error::ApiError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .context("find user by phone")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            fullname: Set(user.fullname.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            profile_image: Set(user.profile_image.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(map_user_insert_err)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn set_profile_image(&self, id: Uuid, key: Option<&str>) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            profile_image: Set(key.map(str::to_owned)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set profile image")?;
        Ok(())
    }
}

// The existence checks in the use case race with concurrent registrations;
// the unique indexes are the final word.
fn map_user_insert_err(e: DbErr) -> ApiError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("phone") => {
            ApiError::PhoneTaken
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::EmailTaken,
        _ => anyhow::Error::new(e).context("create user").into(),
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    Ok(User {
        role: model.role.parse().context("stored user role")?,
        id: model.id,
        fullname: model.fullname,
        email: model.email,
        phone: model.phone,
        password_hash: model.password_hash,
        profile_image: model.profile_image,
        created_at: model.created_at,
    })
}

// ── OTP repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn create(&self, record: &OtpRecord) -> Result<(), ApiError> {
        otp_verifications::ActiveModel {
            id: Set(record.id),
            phone: Set(record.phone.clone()),
            code: Set(record.code.clone()),
            created_at: Set(record.created_at),
            expires_at: Set(record.expires_at),
            is_used: Set(record.is_used),
        }
        .insert(&self.db)
        .await
        .context("create otp")?;
        Ok(())
    }

    async fn find_latest_valid(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, ApiError> {
        let model = otp_verifications::Entity::find()
            .filter(otp_verifications::Column::Code.eq(code))
            .filter(otp_verifications::Column::IsUsed.eq(false))
            .filter(otp_verifications::Column::ExpiresAt.gt(now))
            .order_by_desc(otp_verifications::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find valid otp")?;
        Ok(model.map(otp_from_model))
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = otp_verifications::Entity::update_many()
            .col_expr(otp_verifications::Column::IsUsed, Expr::value(true))
            .filter(otp_verifications::Column::Id.eq(id))
            .filter(otp_verifications::Column::IsUsed.eq(false))
            .exec(&self.db)
            .await
            .context("mark otp used")?;
        Ok(result.rows_affected == 1)
    }
}

fn otp_from_model(model: otp_verifications::Model) -> OtpRecord {
    OtpRecord {
        id: model.id,
        phone: model.phone,
        code: model.code,
        created_at: model.created_at,
        expires_at: model.expires_at,
        is_used: model.is_used,
    }
}

// ── Phone grant repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGrantRepository {
    pub db: DatabaseConnection,
}

impl GrantRepository for DbGrantRepository {
    async fn create(&self, grant: &PhoneGrant) -> Result<(), ApiError> {
        phone_grants::ActiveModel {
            id: Set(grant.id),
            phone: Set(grant.phone.clone()),
            created_at: Set(grant.created_at),
            expires_at: Set(grant.expires_at),
            consumed_at: Set(grant.consumed_at),
        }
        .insert(&self.db)
        .await
        .context("create phone grant")?;
        Ok(())
    }

    async fn find_active(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<PhoneGrant>, ApiError> {
        let model = phone_grants::Entity::find_by_id(id)
            .filter(phone_grants::Column::ConsumedAt.is_null())
            .filter(phone_grants::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find active phone grant")?;
        Ok(model.map(grant_from_model))
    }

    async fn redeem(
        &self,
        grant_id: Uuid,
        user_id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        let redeemed = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                let password_hash = password_hash.to_owned();
                Box::pin(async move {
                    let consumed = phone_grants::Entity::update_many()
                        .col_expr(phone_grants::Column::ConsumedAt, Expr::value(now))
                        .filter(phone_grants::Column::Id.eq(grant_id))
                        .filter(phone_grants::Column::ConsumedAt.is_null())
                        .filter(phone_grants::Column::ExpiresAt.gt(now))
                        .exec(txn)
                        .await?;
                    if consumed.rows_affected == 0 {
                        return Ok(false);
                    }
                    users::ActiveModel {
                        id: Set(user_id),
                        password_hash: Set(Some(password_hash)),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .context("redeem phone grant")?;
        Ok(redeemed)
    }
}

fn grant_from_model(model: phone_grants::Model) -> PhoneGrant {
    PhoneGrant {
        id: model.id,
        phone: model.phone,
        created_at: model.created_at,
        expires_at: model.expires_at,
        consumed_at: model.consumed_at,
    }
}

// ── Leave repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLeaveRepository {
    pub db: DatabaseConnection,
}

impl LeaveRepository for DbLeaveRepository {
    async fn create(&self, request: &LeaveRequest) -> Result<(), ApiError> {
        leave_requests::ActiveModel {
            id: Set(request.id),
            employee_id: Set(request.employee_id),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            reason: Set(request.reason.clone()),
            status: Set(request.status.as_str().to_owned()),
            requested_at: Set(request.requested_at),
            approved_by_id: Set(request.approved_by_id),
            approved_at: Set(request.approved_at),
        }
        .insert(&self.db)
        .await
        .context("create leave request")?;
        Ok(())
    }

    async fn decide(
        &self,
        id: Uuid,
        decision: LeaveDecision,
        at: DateTime<Utc>,
    ) -> Result<Option<LeaveRequest>, ApiError> {
        // Guarded on the current status so two concurrent decisions cannot both land.
        let sources: Vec<&str> = decision.sources().map(LeaveStatus::as_str).collect();
        let result = leave_requests::Entity::update_many()
            .col_expr(
                leave_requests::Column::Status,
                Expr::value(decision.target().as_str()),
            )
            .col_expr(leave_requests::Column::ApprovedAt, Expr::value(at))
            .filter(leave_requests::Column::Id.eq(id))
            .filter(leave_requests::Column::Status.is_in(sources))
            .exec(&self.db)
            .await
            .context("decide leave request")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        let model = leave_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("reload leave request")?;
        model.map(leave_from_model).transpose()
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<LeaveRequest>, ApiError> {
        let models = leave_requests::Entity::find()
            .filter(leave_requests::Column::EmployeeId.eq(employee_id))
            .order_by_desc(leave_requests::Column::RequestedAt)
            .all(&self.db)
            .await
            .context("list leave requests by employee")?;
        models.into_iter().map(leave_from_model).collect()
    }

    async fn list_by_status(&self, status: LeaveStatus) -> Result<Vec<LeaveRequest>, ApiError> {
        let models = leave_requests::Entity::find()
            .filter(leave_requests::Column::Status.eq(status.as_str()))
            .order_by_desc(leave_requests::Column::RequestedAt)
            .all(&self.db)
            .await
            .context("list leave requests by status")?;
        models.into_iter().map(leave_from_model).collect()
    }
}

fn leave_from_model(model: leave_requests::Model) -> Result<LeaveRequest, ApiError> {
    Ok(LeaveRequest {
        status: model.status.parse().context("stored leave status")?,
        id: model.id,
        employee_id: model.employee_id,
        start_date: model.start_date,
        end_date: model.end_date,
        reason: model.reason,
        requested_at: model.requested_at,
        approved_by_id: model.approved_by_id,
        approved_at: model.approved_at,
    })
}

// ── Image repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbImageRepository {
    pub db: DatabaseConnection,
}

impl ImageRepository for DbImageRepository {
    async fn create(&self, image: &Image) -> Result<(), ApiError> {
        images::ActiveModel {
            id: Set(image.id),
            path: Set(image.path.clone()),
            created_at: Set(image.created_at),
        }
        .insert(&self.db)
        .await
        .context("create image")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Image>, ApiError> {
        let model = images::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find image by id")?;
        Ok(model.map(image_from_model))
    }

    async fn list(&self) -> Result<Vec<Image>, ApiError> {
        let models = images::Entity::find()
            .order_by_asc(images::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list images")?;
        Ok(models.into_iter().map(image_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = images::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete image")?;
        Ok(result.rows_affected > 0)
    }
}

fn image_from_model(model: images::Model) -> Image {
    Image {
        id: model.id,
        path: model.path,
        created_at: model.created_at,
    }
}

// ── Info item repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInfoItemRepository {
    pub db: DatabaseConnection,
}

impl InfoItemRepository for DbInfoItemRepository {
    async fn list(&self) -> Result<Vec<InfoItem>, ApiError> {
        let models = info_items::Entity::find()
            .order_by_asc(info_items::Column::Name)
            .all(&self.db)
            .await
            .context("list info items")?;
        Ok(models.into_iter().map(info_item_from_model).collect())
    }

    async fn create(&self, item: &InfoItem) -> Result<(), ApiError> {
        info_items::ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            detail: Set(item.detail.clone()),
        }
        .insert(&self.db)
        .await
        .context("create info item")?;
        Ok(())
    }

    async fn update(&self, item: &InfoItem) -> Result<bool, ApiError> {
        let result = info_items::Entity::update_many()
            .col_expr(info_items::Column::Name, Expr::value(item.name.clone()))
            .col_expr(info_items::Column::Detail, Expr::value(item.detail.clone()))
            .filter(info_items::Column::Id.eq(item.id))
            .exec(&self.db)
            .await
            .context("update info item")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = info_items::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete info item")?;
        Ok(result.rows_affected > 0)
    }
}

fn info_item_from_model(model: info_items::Model) -> InfoItem {
    InfoItem {
        id: model.id,
        name: model.name,
        detail: model.detail,
    }
}
