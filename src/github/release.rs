use crate::error::{Error, Result};
use crate::github::transport::{HttpResponse, HttpTransport};

use log::{debug, info};
use reqwest::Url;
use serde::Deserialize;
use std::io::Read;

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const OCTET_STREAM: &str = "application/octet-stream";
const PER_PAGE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// Fetches the bytes of a named asset attached to a tagged release.
pub trait AssetFetcher {
    /// # Errors
    ///
    /// [`Error::NotFound`] if the release or asset does not exist,
    /// [`Error::Transport`] for network and authentication failures.
    fn fetch_asset(&self, tag: &str, name: &str) -> Result<Box<dyn Read + Send>>;
}

/// Minimal client for the GitHub releases API of one repository.
pub struct ReleaseClient<T> {
    transport: T,
    api_url: Url,
    owner: String,
    repo: String,
}

impl<T: HttpTransport> ReleaseClient<T> {
    /// `repository` is `owner/name`, as in `GITHUB_REPOSITORY`.
    pub fn new(transport: T, api_url: &str, repository: &str) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| Error::Config(format!("invalid GitHub API url '{api_url}': {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "invalid GitHub API url '{api_url}'"
            )));
        }

        let (owner, repo) = repository
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
            .ok_or_else(|| {
                Error::Config(format!(
                    "invalid repository '{repository}', expected owner/name"
                ))
            })?;

        Ok(Self {
            transport,
            api_url,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn release_by_tag(&self, tag: &str) -> Result<Release> {
        let url = self.endpoint(&["releases", "tags", tag], &[])?;
        let response = self.transport.get(&url, JSON_MEDIA_TYPE)?;
        let response = check_status(response, || {
            format!("{}/{}@{tag}", self.owner, self.repo)
        })?;
        response.json()
    }

    /// Lists all assets of a release, following pagination until a short page.
    pub fn list_assets(&self, release_id: u64) -> Result<Vec<ReleaseAsset>> {
        let release_id = release_id.to_string();
        let per_page = PER_PAGE.to_string();
        let mut assets = Vec::new();
        let mut page = 1usize;

        loop {
            let page_str = page.to_string();
            let url = self.endpoint(
                &["releases", &release_id, "assets"],
                &[("per_page", &per_page), ("page", &page_str)],
            )?;
            let response = self.transport.get(&url, JSON_MEDIA_TYPE)?;
            let response = check_status(response, || {
                format!("{}/{} release {release_id}", self.owner, self.repo)
            })?;

            let batch: Vec<ReleaseAsset> = response.json()?;
            let last_page = batch.len() < PER_PAGE;
            assets.extend(batch);

            if last_page {
                break;
            }
            page += 1;
        }

        debug!("release {release_id} has {} asset(s)", assets.len());
        Ok(assets)
    }

    pub fn download_asset(&self, asset: &ReleaseAsset) -> Result<Box<dyn Read + Send>> {
        let url = self.endpoint(&["releases", "assets", &asset.id.to_string()], &[])?;
        let response = self.transport.get(&url, OCTET_STREAM)?;
        let response = check_status(response, || asset.name.clone())?;
        Ok(response.body)
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<String> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("invalid GitHub API url '{}'", self.api_url)))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url.to_string())
    }
}

impl<T: HttpTransport> AssetFetcher for ReleaseClient<T> {
    fn fetch_asset(&self, tag: &str, name: &str) -> Result<Box<dyn Read + Send>> {
        let release = self.release_by_tag(tag)?;
        info!("found release {} for tag {tag}", release.id);

        let asset = self
            .list_assets(release.id)?
            .into_iter()
            .find(|a| a.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        debug!("downloading asset {} ({} bytes)", asset.name, asset.size);
        self.download_asset(&asset)
    }
}

fn check_status<F>(response: HttpResponse, what: F) -> Result<HttpResponse>
where
    F: FnOnce() -> String,
{
    if response.is_success() {
        return Ok(response);
    }

    match response.status {
        404 => Err(Error::NotFound(what())),
        401 | 403 => Err(Error::Transport(format!(
            "authentication failed for {} (HTTP {})",
            response.url, response.status
        ))),
        s => Err(Error::Transport(format!(
            "unexpected HTTP status {s} from {}",
            response.url
        ))),
    }
}
