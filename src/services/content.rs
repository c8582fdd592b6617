use crate::models::article::{Article, ArticleMeta};

const WORDS_PER_MINUTE: usize = 200;

/// A markdown article compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct ArticleSource {
    pub slug: &'static str,
    pub category: &'static str,
    pub markdown: &'static str,
}

const EMBEDDED: &[ArticleSource] = &[
    ArticleSource {
        slug: "stuttgart-city-guide",
        category: "city-guide",
        markdown: include_str!("../../content/articles/stuttgart-city-guide.md"),
    },
    ArticleSource {
        slug: "opening-a-german-bank-account",
        category: "banking",
        markdown: include_str!("../../content/articles/opening-a-german-bank-account.md"),
    },
    ArticleSource {
        slug: "residence-permit-basics",
        category: "residency",
        markdown: include_str!("../../content/articles/residence-permit-basics.md"),
    },
];

/// Serves pre-bundled markdown keyed by slug. The text is passed through
/// untouched.
#[derive(Debug, Clone, Copy)]
pub struct ContentLoader {
    sources: &'static [ArticleSource],
}

impl ContentLoader {
    pub fn embedded() -> Self {
        Self::new(EMBEDDED)
    }

    pub fn new(sources: &'static [ArticleSource]) -> Self {
        Self { sources }
    }

    pub fn list(&self) -> Vec<ArticleMeta> {
        self.sources.iter().map(meta_of).collect()
    }

    pub fn get(&self, slug: &str) -> Option<Article> {
        self.sources
            .iter()
            .find(|source| source.slug == slug)
            .map(|source| Article {
                meta: meta_of(source),
                content: source.markdown,
            })
    }
}

fn meta_of(source: &ArticleSource) -> ArticleMeta {
    ArticleMeta {
        slug: source.slug,
        title: title_of(source),
        category: source.category,
        reading_time_minutes: reading_time(source.markdown),
    }
}

fn title_of(source: &ArticleSource) -> String {
    source
        .markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .unwrap_or_else(|| source.slug.to_string())
}

fn reading_time(markdown: &str) -> u32 {
    let words = markdown.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURES: &[ArticleSource] = &[ArticleSource {
        slug: "no-heading",
        category: "misc",
        markdown: "Just text without a heading.",
    }];

    #[test]
    fn embedded_articles_have_titles_from_headings() {
        let loader = ContentLoader::embedded();
        let titles: Vec<String> = loader.list().into_iter().map(|meta| meta.title).collect();
        assert!(titles.contains(&"Stuttgart City Guide".to_string()));
        assert!(titles.contains(&"Opening a German Bank Account".to_string()));
    }

    #[test]
    fn article_content_is_returned_verbatim() {
        let loader = ContentLoader::embedded();
        let article = loader.get("residence-permit-basics").expect("embedded");
        assert!(article.content.starts_with("# Residence Permit Basics"));
        assert_eq!(article.meta.category, "residency");
        assert!(loader.get("missing").is_none());
    }

    #[test]
    fn title_falls_back_to_slug_and_reading_time_is_at_least_a_minute() {
        let meta = ContentLoader::new(FIXTURES).list().remove(0);
        assert_eq!(meta.title, "no-heading");
        assert_eq!(meta.reading_time_minutes, 1);
        assert_eq!(reading_time(&"word ".repeat(401)), 3);
    }
}
