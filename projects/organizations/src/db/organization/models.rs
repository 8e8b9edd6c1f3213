use diesel::prelude::*;
use crate::db::schema::organizations;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Organization {
    pub name: String,
    pub description: String,
    pub url: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = organizations)]
pub struct NewOrganization {
    pub name: String,
    pub description: String,
    pub url: String,
    pub year: i32,
}

impl From<NewOrganization> for Organization {
    fn from(new: NewOrganization) -> Self {
        Self {
            name: new.name,
            description: new.description,
            url: new.url,
            year: new.year,
        }
    }
}
