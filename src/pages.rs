//! Full-screen pages, exactly one of which is shown at a time.

pub const LANDING_PAGE: &str = "landing-page";
pub const QUESTION_PAGE: &str = "question-page";
pub const ACCEPTANCE_PAGE: &str = "acceptance-page";

#[derive(Debug, Clone)]
struct PageEntry {
    id: String,
    hidden: bool,
}

#[derive(Debug, Clone)]
pub struct PageSet {
    pages: Vec<PageEntry>,
}

impl PageSet {
    /// All pages start hidden.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: ids
                .into_iter()
                .map(|id| PageEntry {
                    id: id.into(),
                    hidden: true,
                })
                .collect(),
        }
    }

    /// The card's three pages with the landing page showing.
    pub fn card() -> Self {
        let mut pages = Self::new([LANDING_PAGE, QUESTION_PAGE, ACCEPTANCE_PAGE]);
        pages.show(LANDING_PAGE);
        pages
    }

    /// Hide every page, then reveal `id`. An unknown id leaves every page
    /// hidden.
    pub fn show(&mut self, id: &str) {
        for page in &mut self.pages {
            page.hidden = true;
        }
        match self.pages.iter_mut().find(|page| page.id == id) {
            Some(page) => {
                page.hidden = false;
                tracing::debug!(page = id, "page shown");
            }
            None => tracing::debug!(page = id, "unknown page, all pages hidden"),
        }
    }

    pub fn visible(&self) -> Option<&str> {
        self.pages
            .iter()
            .find(|page| !page.hidden)
            .map(|page| page.id.as_str())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible() == Some(id)
    }

    pub fn visible_count(&self) -> usize {
        self.pages.iter().filter(|page| !page.hidden).count()
    }
}
