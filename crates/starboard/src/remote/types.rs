//! Wire types for the remote catalog API.
//!
//! Field names here are an external contract and mirror the remote JSON
//! payload exactly (`stargazers_count`, `full_name`, `html_url`, ...). Do not
//! rename them to taste; the domain mapping lives in [`crate::model`].

use serde::Deserialize;

/// One page of keyword-search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponseDto {
    pub items: Vec<RepoDto>,
}

/// A repository as the remote catalog describes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoDto {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: i32,
    pub forks_count: i32,
    pub watchers_count: i32,
    pub open_issues_count: i32,
    pub language: Option<String>,
    pub html_url: String,
    pub owner: OwnerDto,
}

/// The subset of the owner object we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerDto {
    pub avatar_url: String,
}
