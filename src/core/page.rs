//! Portfolio page model — the scrollable document the controller reacts to.
//!
//! The page is a flat list of rows grouped into sections.  Every row is one
//! terminal line tall; `line_height_px` converts rows into the pixel offsets
//! that the scroll source deals in.

/// A single rendered row of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLine<'a> {
    Heading(&'a str),
    Text(&'a str),
    Blank,
}

#[derive(Debug, Clone)]
pub struct Section {
    /// Anchor used by the navigation rail.
    pub id: &'static str,
    pub title: &'static str,
    pub body: Vec<&'static str>,
}

impl Section {
    fn new(id: &'static str, title: &'static str, body: &[&'static str]) -> Self {
        Self {
            id,
            title,
            body: body.to_vec(),
        }
    }

    /// Heading + body + trailing blank.
    fn row_count(&self) -> usize {
        self.body.len() + 2
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    sections: Vec<Section>,
    line_height_px: u32,
}

impl Page {
    pub fn new(sections: Vec<Section>, line_height_px: u32) -> Self {
        Self {
            sections,
            line_height_px: line_height_px.max(1),
        }
    }

    /// The built-in profile page: info card, work history, skills, opinions
    /// and social links.
    pub fn portfolio(line_height_px: u32) -> Self {
        let sections = vec![
            Section::new(
                "about",
                "About",
                &[
                    "Backend-leaning software engineer who enjoys small, sharp tools.",
                    "Based in Europe, working remotely with distributed teams.",
                    "",
                    "I like type systems, boring infrastructure and fast feedback loops.",
                    "Outside of work: climbing, film photography, too much coffee.",
                ],
            ),
            Section::new(
                "work",
                "Work history",
                &[
                    "2022 – now   Senior Engineer, payments platform",
                    "             Owned the ledger service and its migration to event sourcing.",
                    "             Cut p99 settlement latency from 1.8s to 240ms.",
                    "",
                    "2019 – 2022  Software Engineer, logistics startup",
                    "             Built the routing API and the driver-facing mobile backend.",
                    "             Introduced contract tests between six services.",
                    "",
                    "2017 – 2019  Junior Developer, digital agency",
                    "             Shipped marketing sites and internal dashboards.",
                    "",
                    "2014 – 2017  B.Sc. Computer Science",
                ],
            ),
            Section::new(
                "skills",
                "Skills",
                &[
                    "Languages     Go, Rust, TypeScript, SQL",
                    "Backend       gRPC, REST, message queues, PostgreSQL, SQLite",
                    "Frontend      Angular, RxJS, SCSS",
                    "Operations    Docker, Kubernetes, Terraform, GitHub Actions",
                    "Practices     TDD, trunk-based development, code review",
                ],
            ),
            Section::new(
                "opinions",
                "Opinions",
                &[
                    "\"Most services should start as a single binary.\"",
                    "\"Logs are for humans, metrics are for machines.\"",
                    "\"If the test is hard to write, the design is telling you something.\"",
                    "\"Throttle the event, not the user.\"",
                    "\"Delete code with the same enthusiasm you write it.\"",
                ],
            ),
            Section::new(
                "contact",
                "Links",
                &[
                    "GitHub     github.com/<handle>",
                    "LinkedIn   linkedin.com/in/<handle>",
                    "Mail       hello@<domain>",
                ],
            ),
        ];
        Self::new(sections, line_height_px)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn line_height_px(&self) -> u32 {
        self.line_height_px
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(Section::row_count).sum()
    }

    /// Total document height in pixels.
    pub fn height_px(&self) -> u32 {
        u32::try_from(self.row_count())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.line_height_px)
    }

    /// Largest scroll offset that still fills a viewport of the given height.
    pub fn max_scroll(&self, viewport_height_px: u32) -> u32 {
        self.height_px().saturating_sub(viewport_height_px)
    }

    /// Pixel offset of the heading of section `index` (the navigation jump
    /// target).
    pub fn section_offset(&self, index: usize) -> Option<u32> {
        if index >= self.sections.len() {
            return None;
        }
        let rows: usize = self.sections[..index].iter().map(Section::row_count).sum();
        Some(u32::try_from(rows).unwrap_or(u32::MAX).saturating_mul(self.line_height_px))
    }

    /// Index of the section whose rows contain `scroll_px`.
    pub fn section_at(&self, scroll_px: u32) -> Option<usize> {
        let row = (scroll_px / self.line_height_px) as usize;
        let mut start = 0;
        for (i, section) in self.sections.iter().enumerate() {
            let end = start + section.row_count();
            if row < end {
                return Some(i);
            }
            start = end;
        }
        self.sections.len().checked_sub(1)
    }

    /// Flattened rows in document order.
    pub fn lines(&self) -> impl Iterator<Item = PageLine<'_>> {
        self.sections.iter().flat_map(|s| {
            std::iter::once(PageLine::Heading(s.title))
                .chain(s.body.iter().map(|l| {
                    if l.is_empty() {
                        PageLine::Blank
                    } else {
                        PageLine::Text(*l)
                    }
                }))
                .chain(std::iter::once(PageLine::Blank))
        })
    }
}
