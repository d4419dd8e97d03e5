//! Extension-based eligibility for sequence data files.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Fasta,
    Fastq,
    Sam,
    Bam,
}

impl Category {
    /// Priority order used when suffix sets are matched.
    pub const ALL: [Category; 4] = [Category::Fasta, Category::Fastq, Category::Sam, Category::Bam];

    pub const fn suffixes(self) -> &'static [&'static str] {
        match self {
            Category::Fasta => &[".fasta", ".fna", ".fas", ".fa"],
            Category::Fastq => &[".fastq", ".fq"],
            Category::Sam => &[".sam"],
            Category::Bam => &[".bam"],
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Fasta => "FASTA",
            Category::Fastq => "FASTQ",
            Category::Sam => "SAM",
            Category::Bam => "BAM",
        };
        f.write_str(s)
    }
}

/// The categories a run is allowed to process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Category::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, c: Category) {
        self.0 |= c.bit();
    }

    pub const fn contains(self, c: Category) -> bool {
        self.0 & c.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = Self::empty();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// Category of `file_name` if its suffix belongs to an enabled category.
///
/// The enable flag gates the category's whole suffix set. Matching is
/// case-sensitive.
pub fn classify(file_name: &str, enabled: CategorySet) -> Option<Category> {
    enabled
        .iter()
        .find(|c| c.suffixes().iter().any(|s| file_name.ends_with(s)))
}
