use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub group_id: i32,
    /// `DD.MM.YYYY`
    pub release_date: String,
    /// Lyric lines as a JSON array of strings.
    #[sea_orm(column_type = "Text")]
    pub text: String,
    #[sea_orm(column_type = "Text")]
    pub link: String,
    /// Set once the song is soft-deleted; live rows keep it NULL.
    pub deleted: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::music_group::Entity",
        from = "Column::GroupId",
        to = "super::music_group::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    MusicGroup,
}

impl Related<super::music_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MusicGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
