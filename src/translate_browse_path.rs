use crate::{address_space::AddressSpace, browse::BrowseEngine, ua};

/// The TranslateBrowsePathsToNodeIds treatment.
///
/// Walks each relative path by chaining Browse calls, accumulating matched targets and
/// out-of-server remainders.
#[derive(Debug)]
pub struct TranslateEngine {
    max_matches: usize,
    max_remaining: usize,
}

impl TranslateEngine {
    #[must_use]
    pub fn new(max_matches: usize, max_remaining: usize) -> Self {
        Self {
            max_matches,
            max_remaining,
        }
    }

    /// Translates one browse path.
    pub fn translate(
        &self,
        space: &dyn AddressSpace,
        browse: &BrowseEngine,
        path: &ua::BrowsePath,
    ) -> ua::BrowsePathResult {
        let elements = &path.relative_path.elements;
        if elements.is_empty() {
            return ua::BrowsePathResult::from_status(ua::StatusCode::BAD_NOTHING_TO_DO);
        }
        if elements
            .iter()
            .any(|element| element.target_name.name().as_str().is_none_or(str::is_empty))
        {
            return ua::BrowsePathResult::from_status(ua::StatusCode::BAD_BROWSE_NAME_INVALID);
        }

        let mut sources = vec![path.starting_node.clone()];
        let mut matches: Vec<ua::ExpandedNodeId> = Vec::new();
        let mut remaining: Vec<(ua::ExpandedNodeId, u32)> = Vec::new();
        // First failed sub-browse, reported when the whole path comes up empty.
        let mut first_error: Option<ua::StatusCode> = None;

        for (index, element) in elements.iter().enumerate() {
            let is_last = index + 1 == elements.len();
            let mut next_sources = Vec::new();

            for source in &sources {
                let direction = if element.is_inverse {
                    ua::BrowseDirection::Inverse
                } else {
                    ua::BrowseDirection::Forward
                };
                let references = match browse.collect_references(
                    space,
                    source,
                    direction,
                    &element.reference_type_id,
                    element.include_subtypes,
                ) {
                    Ok(references) => references,
                    Err(error) => {
                        let mapped = Self::map_browse_status(error.status_code());
                        first_error.get_or_insert(mapped);
                        continue;
                    }
                };

                for reference in references {
                    if reference.browse_name == element.target_name {
                        if is_last {
                            if matches.len() >= self.max_matches {
                                return Self::too_complex(matches);
                            }
                            matches.push(reference.node_id);
                        } else if reference.node_id.is_local_server() {
                            next_sources.push(reference.node_id.node_id().clone());
                        }
                    } else if !reference.node_id.is_local_server()
                        && !reference.node_id.node_id().is_null()
                    {
                        // The browse name of a remote target is unknown here; hand the target
                        // back to the client together with the index of this element.
                        if remaining.len() >= self.max_remaining {
                            return Self::too_complex(matches);
                        }
                        remaining
                            .push((reference.node_id, u32::try_from(index).unwrap_or(u32::MAX)));
                    }
                }
            }

            sources = next_sources;
            if sources.is_empty() && !is_last {
                // No local node left to continue from.
                break;
            }
        }

        Self::finish(matches, remaining, first_error)
    }

    fn finish(
        matches: Vec<ua::ExpandedNodeId>,
        remaining: Vec<(ua::ExpandedNodeId, u32)>,
        first_error: Option<ua::StatusCode>,
    ) -> ua::BrowsePathResult {
        let mut result = ua::BrowsePathResult::default();

        if matches.is_empty() && remaining.is_empty() {
            result.status_code = first_error.unwrap_or(ua::StatusCode::BAD_NO_MATCH);
            return result;
        }

        result.status_code = if matches.is_empty() {
            ua::StatusCode::UNCERTAIN_REFERENCE_OUT_OF_SERVER
        } else {
            ua::StatusCode::GOOD
        };
        result.targets = matches
            .into_iter()
            .map(ua::BrowsePathTarget::matched)
            .chain(
                remaining
                    .into_iter()
                    .map(|(target, index)| ua::BrowsePathTarget::remaining(target, index)),
            )
            .collect();
        result
    }

    fn too_complex(matches: Vec<ua::ExpandedNodeId>) -> ua::BrowsePathResult {
        let mut result =
            ua::BrowsePathResult::from_status(ua::StatusCode::BAD_QUERY_TOO_COMPLEX);
        result.targets = matches
            .into_iter()
            .map(ua::BrowsePathTarget::matched)
            .collect();
        result
    }

    /// Maps the status of a failed sub-browse onto the translate result space.
    fn map_browse_status(status: ua::StatusCode) -> ua::StatusCode {
        if status == ua::StatusCode::BAD_REFERENCE_TYPE_ID_INVALID {
            ua::StatusCode::BAD_NO_MATCH
        } else if status == ua::StatusCode::BAD_OUT_OF_MEMORY
            || status == ua::StatusCode::BAD_NO_CONTINUATION_POINTS
            || status == ua::StatusCode::BAD_VIEW_ID_UNKNOWN
        {
            ua::StatusCode::BAD_QUERY_TOO_COMPLEX
        } else {
            status
        }
    }
}
