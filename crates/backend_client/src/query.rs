use std::fmt::Display;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client::{decode, BackendClient},
    error::BackendError,
};

/// Builder for one REST call against a table, in the style of
/// `from("skills").select("*").order("category", true)`.
pub struct TableQuery<'a> {
    client: &'a BackendClient,
    table: String,
    access_token: Option<String>,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a BackendClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            access_token: None,
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Runs the call as the signed-in user rather than the anonymous role.
    pub fn auth(mut self, access_token: Option<&str>) -> Self {
        self.access_token = access_token.map(str::to_string);
        self
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        let mut params = self.filter_params();
        params.push(("select".to_string(), self.columns.clone()));
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{column}.{direction}")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let request = self
            .client
            .request(Method::GET, &self.path())
            .query(&params);
        let response = self
            .client
            .send(request, self.access_token.as_deref())
            .await?;
        decode(response).await
    }

    /// First matching row, or [`BackendError::NotFound`] when there is none.
    pub async fn single<T: DeserializeOwned>(self) -> Result<T, BackendError> {
        let table = self.table.clone();
        self.limit(1)
            .fetch()
            .await?
            .into_iter()
            .next()
            .ok_or(BackendError::NotFound(table))
    }

    /// Inserts without reading the row back, so it works for roles that may
    /// insert but not select.
    pub async fn insert<B: Serialize + ?Sized>(self, body: &B) -> Result<(), BackendError> {
        let request = self
            .client
            .request(Method::POST, &self.path())
            .header("Prefer", "return=minimal")
            .json(body);
        self.client
            .send(request, self.access_token.as_deref())
            .await?;
        Ok(())
    }

    pub async fn update<B: Serialize + ?Sized>(self, body: &B) -> Result<(), BackendError> {
        let request = self.filtered(Method::PATCH, "update")?.json(body);
        self.client
            .send(request, self.access_token.as_deref())
            .await?;
        Ok(())
    }

    pub async fn delete(self) -> Result<(), BackendError> {
        let request = self.filtered(Method::DELETE, "delete")?;
        self.client
            .send(request, self.access_token.as_deref())
            .await?;
        Ok(())
    }

    fn filtered(
        &self,
        method: Method,
        verb: &'static str,
    ) -> Result<reqwest::RequestBuilder, BackendError> {
        if self.filters.is_empty() {
            return Err(BackendError::MissingFilter(verb));
        }
        Ok(self
            .client
            .request(method, &self.path())
            .query(&self.filter_params()))
    }

    fn filter_params(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }

    fn path(&self) -> String {
        format!("rest/v1/{}", self.table)
    }
}
