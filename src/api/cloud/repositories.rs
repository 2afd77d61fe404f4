//
//  bitbucket-api
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository endpoints.

use reqwest::Method;

use super::Error;
use crate::api::client::ClientConfig;
use crate::api::request::{BuildError, RequestBuilder};
use crate::api::response::DecoderTable;
use crate::api::Call;
use crate::codec::FieldValue;

/// Optional query parameters for [`delete_repository`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteRepositoryParams {
    /// URL that visitors of the old repository are sent to.
    pub redirect_to: FieldValue<String>,
}

/// Builds `DELETE /repositories/{workspace}/{repo_slug}`.
///
/// Deletion is irreversible. A 204 with an empty body means the
/// repository is gone; 400, 403 and 404 carry an [`Error`].
///
/// # Example
///
/// ```rust
/// use bitbucket_api::api::cloud::repositories::{delete_repository, DeleteRepositoryParams};
/// use bitbucket_api::api::Client;
///
/// let call = delete_repository(&Client::cloud(), "acme", "old-repo", DeleteRepositoryParams::default()).unwrap();
/// assert_eq!(call.request().method, reqwest::Method::DELETE);
/// assert!(call.request().query.is_empty());
/// ```
pub fn delete_repository<C: ClientConfig + ?Sized>(
    client: &C,
    workspace: &str,
    repo_slug: &str,
    params: DeleteRepositoryParams,
) -> Result<Call<(), Error>, BuildError> {
    let request = RequestBuilder::new(Method::DELETE, "/repositories/{workspace}/{repo_slug}")
        .path_param(workspace)
        .path_param(repo_slug)
        .query("redirect_to", params.redirect_to)
        .build(client)?;
    Ok(Call::new(
        request,
        DecoderTable::new().raw(204).error(400).error(403).error(404),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::{resolve, Parsed, RawResponse};
    use crate::api::Client;
    use reqwest::StatusCode;
    use serde_json::json;

    fn call() -> Call<(), Error> {
        delete_repository(&Client::cloud(), "ws", "repo", DeleteRepositoryParams::default()).unwrap()
    }

    #[test]
    fn test_delete_resolves_every_documented_status() {
        let call = call();

        let gone = resolve(call.table(), RawResponse::new(StatusCode::NO_CONTENT, Vec::new())).unwrap();
        assert_eq!(gone.parsed, Parsed::Raw(Vec::new()));

        let forbidden = resolve(
            call.table(),
            RawResponse::new(
                StatusCode::FORBIDDEN,
                json!({"type": "error", "error": {"message": "Access denied"}}).to_string(),
            ),
        )
        .unwrap();
        assert_eq!(forbidden.domain_error().unwrap().message(), Some("Access denied"));

        let unknown = resolve(call.table(), RawResponse::new(StatusCode::BAD_GATEWAY, "upstream")).unwrap();
        assert!(unknown.parsed.is_unmatched());
        assert_eq!(unknown.text(), "upstream");
    }

    #[test]
    fn test_redirect_to_is_sent_when_set() {
        let params = DeleteRepositoryParams {
            redirect_to: FieldValue::Value("https://bitbucket.org/ws/new".to_string()),
        };
        let call = delete_repository(&Client::cloud(), "ws", "repo", params).unwrap();
        assert_eq!(
            call.request().query_value("redirect_to"),
            Some("https://bitbucket.org/ws/new")
        );
    }
}
