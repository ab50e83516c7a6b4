//! Id-filter construction from the `ids` query parameter.
//!
//! Every id-filtered endpoint accepts an optional comma-separated list of
//! integer ids. The filter it produces applies to a different document field
//! depending on the target collection: GridFS file metadata for building
//! models, the top-level `id` for attribute collections, and the GeoJSON
//! `properties.id` for feature collections.

/// Field an [`IdFilter`] applies to inside a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    /// GridFS file metadata (`metadata.id`), used for building models.
    Metadata,
    /// Top-level `id`, used for attribute collections.
    TopLevel,
    /// GeoJSON `properties.id`, used for feature collections.
    Properties,
}

impl IdField {
    /// Dotted path of the field inside a stored document.
    pub fn path(&self) -> &'static str {
        match self {
            IdField::Metadata => "metadata.id",
            IdField::TopLevel => "id",
            IdField::Properties => "properties.id",
        }
    }
}

/// Filter predicate built from an optional comma-separated id list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdFilter {
    /// Match every document.
    All,
    /// Match documents whose id is in the set. Ids absent from the
    /// collection are ignored; an empty set matches nothing.
    Ids(Vec<i64>),
}

impl IdFilter {
    /// Parse the raw `ids` query parameter.
    ///
    /// An absent or empty parameter matches everything. Non-numeric tokens
    /// are dropped: they can never equal a stored integer id, so `ids=abc`
    /// matches nothing rather than raising a validation error. In
    /// particular, a list of purely non-numeric tokens must NOT degenerate
    /// to a match-all filter.
    pub fn parse(ids: Option<&str>) -> Self {
        match ids {
            None => IdFilter::All,
            Some(s) if s.trim().is_empty() => IdFilter::All,
            Some(s) => IdFilter::Ids(
                s.split(',')
                    .filter_map(|token| token.trim().parse::<i64>().ok())
                    .collect(),
            ),
        }
    }

    /// True if the filter admits the given id.
    pub fn matches(&self, id: i64) -> bool {
        match self {
            IdFilter::All => true,
            IdFilter::Ids(ids) => ids.contains(&id),
        }
    }
}
