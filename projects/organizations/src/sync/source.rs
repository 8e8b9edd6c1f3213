use async_trait::async_trait;
use interfaces_gsoc_organizations::index::{
    FetchYearOrganizationsError, GsocClient, YearOrganizations,
};

/// Where a sync pass gets each year's organizations from.
#[async_trait]
pub trait OrganizationSource: Send + Sync {
    async fn fetch_year(
        &self,
        year: i32,
    ) -> Result<YearOrganizations, FetchYearOrganizationsError>;

    /// Human-readable origin of `year`, for logs.
    fn describe(&self, year: i32) -> String {
        year.to_string()
    }
}

#[async_trait]
impl OrganizationSource for GsocClient {
    async fn fetch_year(
        &self,
        year: i32,
    ) -> Result<YearOrganizations, FetchYearOrganizationsError> {
        self.fetch_year_organizations(year).await
    }

    fn describe(&self, year: i32) -> String {
        self.year_url(year)
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use interfaces_gsoc_organizations::index::{
        parse_year_organizations, FetchYearOrganizationsError, StatusCode, YearOrganizations,
    };

    use super::OrganizationSource;

    enum Reply {
        Body(String),
        Status(u16),
    }

    /// Canned per-year replies. Years without a reply answer 404.
    #[derive(Default)]
    pub struct ScriptedSource {
        replies: HashMap<i32, Reply>,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn body(mut self, year: i32, body: &str) -> Self {
            self.replies.insert(year, Reply::Body(body.to_string()));
            self
        }

        pub fn status(mut self, year: i32, status: u16) -> Self {
            self.replies.insert(year, Reply::Status(status));
            self
        }
    }

    #[async_trait]
    impl OrganizationSource for ScriptedSource {
        async fn fetch_year(
            &self,
            year: i32,
        ) -> Result<YearOrganizations, FetchYearOrganizationsError> {
            match self.replies.get(&year) {
                Some(Reply::Body(body)) => Ok(parse_year_organizations(body)?),
                Some(Reply::Status(status)) => Err(FetchYearOrganizationsError::UnexpectedStatus {
                    year,
                    status: StatusCode::from_u16(*status).unwrap(),
                }),
                None => Err(FetchYearOrganizationsError::UnexpectedStatus {
                    year,
                    status: StatusCode::NOT_FOUND,
                }),
            }
        }
    }
}
