//! Injected lookups for data the element tree only references by id.
//!
//! The converter never touches a database. Anything it needs to know about
//! users, posts, uploads or smilies comes through a [`Resolver`]. A lookup
//! that finds nothing returns `Ok(None)` and the converter picks its
//! fallback rendering; a lookup that fails returns `Err` and the conversion
//! stops with that error, untouched.

use std::collections::HashMap;
use std::convert::Infallible;

/// A post referenced by a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuotedPost {
    pub username: String,
    pub post_number: u64,
    pub topic_id: u64,
}

/// Lookups supplied by the surrounding import pipeline.
///
/// Every method has a "resolves nothing" default, so implementors only
/// override what they can answer.
pub trait Resolver {
    /// Error raised by a failing lookup.
    type Error;

    /// Display name for a numeric user id.
    fn username(&self, _user_id: u64) -> Result<Option<String>, Self::Error> {
        Ok(None)
    }

    /// Replacement text (usually an emoji shortcode) for a smilie code.
    fn smilie(&self, _code: &str) -> Result<Option<String>, Self::Error> {
        Ok(None)
    }

    /// Author and location of a quoted post.
    fn quoted_post(&self, _post_id: u64) -> Result<Option<QuotedPost>, Self::Error> {
        Ok(None)
    }

    /// Markdown referencing an uploaded attachment.
    fn upload_markdown(
        &self,
        _filename: &str,
        _index: Option<u64>,
    ) -> Result<Option<String>, Self::Error> {
        Ok(None)
    }

    /// Rewrite a link target.
    fn rewrite_url(&self, url: &str) -> Result<String, Self::Error> {
        Ok(url.to_string())
    }
}

impl<R: Resolver + ?Sized> Resolver for &R {
    type Error = R::Error;

    fn username(&self, user_id: u64) -> Result<Option<String>, Self::Error> {
        (**self).username(user_id)
    }

    fn smilie(&self, code: &str) -> Result<Option<String>, Self::Error> {
        (**self).smilie(code)
    }

    fn quoted_post(&self, post_id: u64) -> Result<Option<QuotedPost>, Self::Error> {
        (**self).quoted_post(post_id)
    }

    fn upload_markdown(
        &self,
        filename: &str,
        index: Option<u64>,
    ) -> Result<Option<String>, Self::Error> {
        (**self).upload_markdown(filename, index)
    }

    fn rewrite_url(&self, url: &str) -> Result<String, Self::Error> {
        (**self).rewrite_url(url)
    }
}

/// Resolves nothing and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl Resolver for NoResolver {
    type Error = Infallible;
}

type Lookup<T, A, E> = Box<dyn Fn(A) -> Result<Option<T>, E> + Send + Sync>;

/// A resolver assembled from individual closures.
///
/// Lookups that were not supplied resolve nothing.
pub struct FnResolver<E> {
    username: Option<Lookup<String, u64, E>>,
    smilie: Option<Box<dyn Fn(&str) -> Result<Option<String>, E> + Send + Sync>>,
    quoted_post: Option<Lookup<QuotedPost, u64, E>>,
    upload: Option<Box<dyn Fn(&str, Option<u64>) -> Result<Option<String>, E> + Send + Sync>>,
    url: Option<Box<dyn Fn(&str) -> Result<String, E> + Send + Sync>>,
}

impl<E> FnResolver<E> {
    pub fn new() -> Self {
        Self {
            username: None,
            smilie: None,
            quoted_post: None,
            upload: None,
            url: None,
        }
    }

    /// Set the user-id lookup.
    pub fn with_username(
        mut self,
        f: impl Fn(u64) -> Result<Option<String>, E> + Send + Sync + 'static,
    ) -> Self {
        self.username = Some(Box::new(f));
        self
    }

    /// Set the smilie lookup.
    pub fn with_smilie(
        mut self,
        f: impl Fn(&str) -> Result<Option<String>, E> + Send + Sync + 'static,
    ) -> Self {
        self.smilie = Some(Box::new(f));
        self
    }

    /// Set the quoted-post lookup.
    pub fn with_quoted_post(
        mut self,
        f: impl Fn(u64) -> Result<Option<QuotedPost>, E> + Send + Sync + 'static,
    ) -> Self {
        self.quoted_post = Some(Box::new(f));
        self
    }

    /// Set the attachment lookup.
    pub fn with_upload(
        mut self,
        f: impl Fn(&str, Option<u64>) -> Result<Option<String>, E> + Send + Sync + 'static,
    ) -> Self {
        self.upload = Some(Box::new(f));
        self
    }

    /// Set the URL rewriter.
    pub fn with_url(mut self, f: impl Fn(&str) -> Result<String, E> + Send + Sync + 'static) -> Self {
        self.url = Some(Box::new(f));
        self
    }
}

impl<E> Default for FnResolver<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Resolver for FnResolver<E> {
    type Error = E;

    fn username(&self, user_id: u64) -> Result<Option<String>, E> {
        match &self.username {
            Some(f) => f(user_id),
            None => Ok(None),
        }
    }

    fn smilie(&self, code: &str) -> Result<Option<String>, E> {
        match &self.smilie {
            Some(f) => f(code),
            None => Ok(None),
        }
    }

    fn quoted_post(&self, post_id: u64) -> Result<Option<QuotedPost>, E> {
        match &self.quoted_post {
            Some(f) => f(post_id),
            None => Ok(None),
        }
    }

    fn upload_markdown(&self, filename: &str, index: Option<u64>) -> Result<Option<String>, E> {
        match &self.upload {
            Some(f) => f(filename, index),
            None => Ok(None),
        }
    }

    fn rewrite_url(&self, url: &str) -> Result<String, E> {
        match &self.url {
            Some(f) => f(url),
            None => Ok(url.to_string()),
        }
    }
}

/// Table-driven resolver, typically loaded from a configuration file.
///
/// Ids are kept as strings so the tables read naturally from TOML keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LookupTables {
    /// User id -> display name.
    pub users: HashMap<String, String>,
    /// Smilie code -> replacement text.
    pub smilies: HashMap<String, String>,
    /// Post id -> quoted post.
    pub posts: HashMap<String, QuotedPost>,
    /// Attachment filename -> upload Markdown.
    pub uploads: HashMap<String, String>,
    /// URL prefix rewrites; the first matching prefix wins.
    pub url_rewrites: Vec<UrlRewrite>,
}

/// Replace a URL prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UrlRewrite {
    pub from: String,
    pub to: String,
}

impl Resolver for LookupTables {
    type Error = Infallible;

    fn username(&self, user_id: u64) -> Result<Option<String>, Infallible> {
        Ok(self.users.get(&user_id.to_string()).cloned())
    }

    fn smilie(&self, code: &str) -> Result<Option<String>, Infallible> {
        Ok(self.smilies.get(code).cloned())
    }

    fn quoted_post(&self, post_id: u64) -> Result<Option<QuotedPost>, Infallible> {
        Ok(self.posts.get(&post_id.to_string()).cloned())
    }

    fn upload_markdown(
        &self,
        filename: &str,
        _index: Option<u64>,
    ) -> Result<Option<String>, Infallible> {
        Ok(self.uploads.get(filename).cloned())
    }

    fn rewrite_url(&self, url: &str) -> Result<String, Infallible> {
        let rewritten = self.url_rewrites.iter().find_map(|r| {
            url.strip_prefix(r.from.as_str())
                .map(|rest| format!("{}{}", r.to, rest))
        });
        Ok(rewritten.unwrap_or_else(|| url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_resolver_resolves_nothing() {
        let r = NoResolver;
        assert_eq!(r.username(1).unwrap(), None);
        assert_eq!(r.smilie(":)").unwrap(), None);
        assert_eq!(r.quoted_post(1).unwrap(), None);
        assert_eq!(r.upload_markdown("a.png", Some(0)).unwrap(), None);
        assert_eq!(r.rewrite_url("http://x").unwrap(), "http://x");
    }

    #[test]
    fn test_fn_resolver_propagates_errors() {
        let r = FnResolver::new().with_username(|id| if id == 0 { Err("db down") } else { Ok(None) });
        assert_eq!(r.username(0), Err("db down"));
        assert_eq!(r.username(3), Ok(None));
        assert_eq!(r.smilie(":)"), Ok(None));
    }

    #[test]
    fn test_lookup_tables_url_rewrite_first_match() {
        let tables = LookupTables {
            url_rewrites: vec![
                UrlRewrite {
                    from: "http://old.example.com/".into(),
                    to: "https://new.example.com/".into(),
                },
                UrlRewrite {
                    from: "http://old.example.com/forum/".into(),
                    to: "https://unused/".into(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            tables.rewrite_url("http://old.example.com/forum/t/1").unwrap(),
            "https://new.example.com/forum/t/1"
        );
        assert_eq!(tables.rewrite_url("http://other/").unwrap(), "http://other/");
    }

    #[test]
    fn test_lookup_tables_ids() {
        let mut tables = LookupTables::default();
        tables.users.insert("7".into(), "alice".into());
        assert_eq!(tables.username(7).unwrap().as_deref(), Some("alice"));
        assert_eq!(tables.username(8).unwrap(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_lookup_tables_from_toml() {
        let tables: LookupTables = toml::from_str(
            r#"
            [users]
            "2" = "bob"

            [posts.10]
            username = "carol"
            post_number = 3
            topic_id = 44

            [[url_rewrites]]
            from = "http://a/"
            to = "https://b/"
            "#,
        )
        .unwrap();
        assert_eq!(tables.username(2).unwrap().as_deref(), Some("bob"));
        assert_eq!(
            tables.quoted_post(10).unwrap(),
            Some(QuotedPost {
                username: "carol".into(),
                post_number: 3,
                topic_id: 44,
            })
        );
        assert_eq!(tables.rewrite_url("http://a/x").unwrap(), "https://b/x");
    }
}
