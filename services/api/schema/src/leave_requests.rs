use sea_orm::entity::prelude::*;

/// Employee leave request. `status` is one of `Pending`, `Approved`, `Rejected`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub reason: Option<String>,
    pub status: String,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub approved_by_id: Option<Uuid>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EmployeeId",
        to = "super::users::Column::Id"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ApprovedById",
        to = "super::users::Column::Id"
    )]
    Approver,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
