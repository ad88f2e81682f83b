use std::sync::Arc;

use quill_api::client::Client;
use quill_types::page::Page;
use serde::{Deserialize, Serialize};

use super::{error::Error, feed::PostFeed};

/// Input props of the home page: the first page of posts plus its cursor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HomeProps {
    pub posts_pagination: Page,
}

impl HomeProps {
    /// Seed the incremental loader from these props.
    pub fn into_feed(self, http: Arc<Client>) -> PostFeed {
        PostFeed::seed(http, self.posts_pagination)
    }
}

/// Build-time fetch backing the home page. A failure here is a generation
/// failure and propagates to the caller; there is no local recovery.
pub async fn get_static_props(http: &Client) -> Result<HomeProps, Error> {
    let page = http.front_page().await?;
    Ok(HomeProps {
        posts_pagination: page,
    })
}
