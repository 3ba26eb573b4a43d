use lexi_types::ArticleEntry;

use crate::store::{Store, push_front_capped};
use crate::{StoreError, keys, now_ms};

impl Store {
    /// Newest first
    pub async fn articles(&self) -> Vec<ArticleEntry> {
        self.load_or_default(keys::ARTICLES).await
    }

    pub async fn article(&self, url: &str) -> Option<ArticleEntry> {
        self.articles().await.into_iter().find(|a| a.url == url)
    }

    /// Insert or refresh the entry for `article.url`.
    ///
    /// Known articles keep their position and their looked-up words; an empty
    /// title does not overwrite a known one.
    pub async fn upsert_article(&self, article: ArticleEntry) -> Result<ArticleEntry, StoreError> {
        let cap = self.limits.articles;
        let mut saved = article.clone();

        self.update(keys::ARTICLES, |articles: &mut Vec<ArticleEntry>| {
            match articles.iter_mut().find(|a| a.url == article.url) {
                Some(existing) => {
                    if !article.title.is_empty() {
                        existing.title = article.title.clone();
                    }
                    existing.word_count = article.word_count.max(existing.word_count);
                    existing.timestamp = now_ms();
                    for word in &article.words_looked_up {
                        existing.record_lookup(word);
                    }
                    saved = existing.clone();
                }
                None => push_front_capped(articles, article, cap),
            }
        })
        .await?;

        tracing::debug!("Saved article {}", saved.url);
        Ok(saved)
    }

    /// Record a looked-up word under the page it was looked up on.
    ///
    /// A page with no entry yet gets a provisional one that a later upsert completes.
    pub async fn add_word_to_article(&self, url: &str, word: &str) -> Result<bool, StoreError> {
        let cap = self.limits.articles;
        let mut added = false;

        self.update(keys::ARTICLES, |articles: &mut Vec<ArticleEntry>| {
            match articles.iter_mut().find(|a| a.url == url) {
                Some(existing) => added = existing.record_lookup(word),
                None => {
                    let provisional = ArticleEntry {
                        url: url.to_string(),
                        title: String::new(),
                        timestamp: now_ms(),
                        word_count: 0,
                        words_looked_up: vec![word.to_string()],
                    };
                    push_front_capped(articles, provisional, cap);
                    added = true;
                }
            }
        })
        .await?;

        Ok(added)
    }

    pub async fn words_for_url(&self, url: &str) -> Vec<String> {
        self.article(url)
            .await
            .map(|a| a.words_looked_up)
            .unwrap_or_default()
    }

    pub async fn delete_article(&self, url: &str) -> Result<bool, StoreError> {
        let mut removed = false;
        self.update(keys::ARTICLES, |articles: &mut Vec<ArticleEntry>| {
            let before = articles.len();
            articles.retain(|a| a.url != url);
            removed = articles.len() != before;
        })
        .await?;
        Ok(removed)
    }

    pub async fn clear_articles(&self) -> Result<(), StoreError> {
        self.save(keys::ARTICLES, &Vec::<ArticleEntry>::new()).await
    }

    pub async fn articles_count(&self) -> usize {
        self.articles().await.len()
    }
}
