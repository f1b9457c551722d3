use crate::{
    Error, Result,
    address_space::{AddressSpace, NodeHandle, Reference},
    session::Session,
    ua,
};

/// Browse parameters persisted across continuation calls.
#[derive(Debug, Clone)]
pub struct BrowseParameters {
    pub view_id: ua::NodeId,
    pub node_id: ua::NodeId,
    pub browse_direction: ua::BrowseDirection,
    pub reference_type_id: ua::NodeId,
    pub include_subtypes: bool,
    pub node_class_mask: ua::NodeClassMask,
    pub result_mask: ua::BrowseResultMask,
    pub max_references_per_node: u32,
}

impl BrowseParameters {
    fn from_description(
        view: &ua::ViewDescription,
        description: &ua::BrowseDescription,
        max_references_per_node: u32,
    ) -> Self {
        Self {
            view_id: view.view_id.clone(),
            node_id: description.node_id.clone(),
            browse_direction: description.browse_direction,
            reference_type_id: description.reference_type_id.clone(),
            include_subtypes: description.include_subtypes,
            node_class_mask: description.node_class_mask,
            result_mask: description.result_mask,
            max_references_per_node,
        }
    }

    /// Checks whether a reference type filter is in effect.
    fn reference_type_defined(&self) -> bool {
        !self.reference_type_id.is_null()
    }
}

/// Server-side cursor persisting Browse progress across client calls.
///
/// A session holds at most one continuation point at a time.
#[derive(Debug, Clone)]
pub struct ContinuationPoint {
    id: u64,
    next_index: usize,
    parameters: BrowseParameters,
}

impl ContinuationPoint {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Wire form of the continuation-point handle.
    #[must_use]
    pub fn handle(&self) -> ua::ContinuationPoint {
        ua::ContinuationPoint::from_identifier(self.id)
    }
}

/// Outcome of one reference-list iteration.
struct FillOutcome {
    references: Vec<ua::ReferenceDescription>,
    /// Index of the first reference not visited, set when iteration stopped on the cap with
    /// references remaining.
    next_index: Option<usize>,
}

/// The Browse and BrowseNext treatment.
///
/// Owns the continuation-point identifier sequence; the continuation points themselves are
/// attached to their session.
#[derive(Debug)]
pub struct BrowseEngine {
    max_references_per_node: usize,
    next_continuation_point_id: u64,
}

impl BrowseEngine {
    #[must_use]
    pub fn new(max_references_per_node: usize) -> Self {
        Self {
            max_references_per_node,
            next_continuation_point_id: 1,
        }
    }

    /// Browses one node, paging through a continuation point when the result cap is reached.
    ///
    /// With `auto_release` set, an existing continuation point on the session is released before
    /// the new one is stored; otherwise a second continuation point is refused with
    /// [`BAD_NO_CONTINUATION_POINTS`](ua::StatusCode::BAD_NO_CONTINUATION_POINTS).
    pub fn browse(
        &mut self,
        space: &dyn AddressSpace,
        session: &mut Session,
        view: &ua::ViewDescription,
        description: &ua::BrowseDescription,
        requested_max_references: u32,
        auto_release: bool,
    ) -> ua::BrowseResult {
        let parameters =
            BrowseParameters::from_description(view, description, requested_max_references);
        match self.compute(space, session, &parameters, 0, auto_release) {
            Ok(result) => result,
            Err(error) => ua::BrowseResult::from_status(error.status_code()),
        }
    }

    /// Continues a paged Browse from its continuation point.
    ///
    /// The continuation point is always released; a fresh one is stored when further references
    /// remain. With `release_only` set, no references are returned.
    pub fn browse_next(
        &mut self,
        space: &dyn AddressSpace,
        session: &mut Session,
        continuation_point: &ua::ContinuationPoint,
        release_only: bool,
    ) -> ua::BrowseResult {
        let Some(saved) = Self::take_continuation_point(session, continuation_point) else {
            return ua::BrowseResult::from_status(ua::StatusCode::BAD_CONTINUATION_POINT_INVALID);
        };
        if release_only {
            return ua::BrowseResult::from_status(ua::StatusCode::GOOD);
        }
        match self.compute(space, session, &saved.parameters, saved.next_index, false) {
            Ok(result) => result,
            Err(error) => ua::BrowseResult::from_status(error.status_code()),
        }
    }

    /// Collects all matching references of one node without paging.
    ///
    /// Used by the relative-path walker, which has no continuation point to spill into: hitting
    /// the server cap reports
    /// [`BAD_NO_CONTINUATION_POINTS`](ua::StatusCode::BAD_NO_CONTINUATION_POINTS).
    ///
    /// # Errors
    ///
    /// Fails as Browse does on unknown nodes and invalid reference types.
    pub fn collect_references(
        &self,
        space: &dyn AddressSpace,
        node_id: &ua::NodeId,
        browse_direction: ua::BrowseDirection,
        reference_type_id: &ua::NodeId,
        include_subtypes: bool,
    ) -> Result<Vec<ua::ReferenceDescription>> {
        let parameters = BrowseParameters {
            view_id: ua::NodeId::default(),
            node_id: node_id.clone(),
            browse_direction,
            reference_type_id: reference_type_id.clone(),
            include_subtypes,
            node_class_mask: ua::NodeClassMask::any(),
            result_mask: ua::BrowseResultMask::all(),
            max_references_per_node: 0,
        };
        let (source, _) = self.validate(space, &parameters)?;
        let outcome = self.fill(space, source, &parameters, 0, self.max_references_per_node);
        if outcome.next_index.is_some() {
            return Err(Error::new(ua::StatusCode::BAD_NO_CONTINUATION_POINTS));
        }
        Ok(outcome.references)
    }

    fn compute(
        &mut self,
        space: &dyn AddressSpace,
        session: &mut Session,
        parameters: &BrowseParameters,
        start_index: usize,
        auto_release: bool,
    ) -> Result<ua::BrowseResult> {
        let (source, reference_count) = self.validate(space, parameters)?;

        // The effective cap: the requested maximum (0 leaves the choice to the server), bounded
        // by the server cap and the actual reference count.
        let requested =
            usize::try_from(parameters.max_references_per_node).unwrap_or(usize::MAX);
        let max_results = if requested == 0 {
            self.max_references_per_node
        } else {
            requested.min(self.max_references_per_node)
        }
        .min(reference_count);

        let outcome = self.fill(space, source, parameters, start_index, max_results);

        let mut result = ua::BrowseResult::from_status(ua::StatusCode::GOOD);
        result.references = outcome.references;

        if let Some(next_index) = outcome.next_index {
            if session.continuation_point().is_some() {
                if !auto_release {
                    result.status_code = ua::StatusCode::BAD_NO_CONTINUATION_POINTS;
                    return Ok(result);
                }
                session.release_continuation_point();
            }
            let continuation_point = ContinuationPoint {
                id: self.fresh_continuation_point_id(),
                next_index,
                parameters: parameters.clone(),
            };
            result.continuation_point = Some(continuation_point.handle());
            session.store_continuation_point(continuation_point);
        }

        Ok(result)
    }

    /// Checks the reference type before the source node, as the treatment requires.
    fn validate(
        &self,
        space: &dyn AddressSpace,
        parameters: &BrowseParameters,
    ) -> Result<(NodeHandle, usize)> {
        if parameters.reference_type_defined()
            && !space.is_valid_reference_type(&parameters.reference_type_id)
        {
            return Err(Error::new(ua::StatusCode::BAD_REFERENCE_TYPE_ID_INVALID));
        }
        if !parameters.view_id.is_null() && space.lookup(&parameters.view_id).is_none() {
            return Err(Error::new(ua::StatusCode::BAD_VIEW_ID_UNKNOWN));
        }
        let source = space
            .lookup(&parameters.node_id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_NODE_ID_UNKNOWN))?;
        Ok((source, space.reference_count(source)))
    }

    fn fill(
        &self,
        space: &dyn AddressSpace,
        source: NodeHandle,
        parameters: &BrowseParameters,
        start_index: usize,
        max_results: usize,
    ) -> FillOutcome {
        let reference_count = space.reference_count(source);
        let mut references = Vec::new();
        let mut index = start_index;

        while index < reference_count {
            if references.len() >= max_results {
                // Stopped on the cap with references left over.
                return FillOutcome {
                    references,
                    next_index: Some(index),
                };
            }
            if let Some(reference) = space.reference_at(source, index) {
                if self.reference_passes(space, &reference, parameters) {
                    references.push(Self::project(space, &reference, parameters.result_mask));
                }
            }
            index += 1;
        }

        FillOutcome {
            references,
            next_index: None,
        }
    }

    /// Applies the direction, reference-type, and node-class filters to one reference.
    fn reference_passes(
        &self,
        space: &dyn AddressSpace,
        reference: &Reference,
        parameters: &BrowseParameters,
    ) -> bool {
        if !parameters.browse_direction.accepts(reference.is_forward) {
            return false;
        }

        if parameters.reference_type_defined()
            && reference.reference_type_id != parameters.reference_type_id
        {
            if !parameters.include_subtypes {
                return false;
            }
            if !space.is_transitive_subtype(
                &reference.reference_type_id,
                &parameters.reference_type_id,
            ) {
                return false;
            }
        }

        // The node class of out-of-server targets is unknown; only the empty mask accepts it.
        let node_class = Self::local_target(space, &reference.target)
            .map(|target| space.node_class(target));
        parameters.node_class_mask.accepts(node_class)
    }

    /// Builds the reference description, with fields outside the result mask left indeterminate.
    fn project(
        space: &dyn AddressSpace,
        reference: &Reference,
        result_mask: ua::BrowseResultMask,
    ) -> ua::ReferenceDescription {
        let mut description = ua::ReferenceDescription {
            node_id: reference.target.clone(),
            ..ua::ReferenceDescription::default()
        };

        if result_mask.includes_reference_type() {
            description.reference_type_id = reference.reference_type_id.clone();
        }
        if result_mask.includes_is_forward() {
            description.is_forward = reference.is_forward;
        }

        // Attributes of the target are only available for nodes of this server.
        let target = Self::local_target(space, &reference.target);
        if let Some(target) = target {
            if result_mask.includes_browse_name() {
                description.browse_name = space.browse_name(target);
            }
            if result_mask.includes_display_name() {
                description.display_name = space.display_name(target);
            }
            if result_mask.includes_node_class() {
                description.node_class = space.node_class(target);
            }
            if result_mask.includes_type_definition() {
                description.type_definition = space.type_definition(target);
            }
        }

        description
    }

    fn local_target(
        space: &dyn AddressSpace,
        target: &ua::ExpandedNodeId,
    ) -> Option<NodeHandle> {
        if !target.is_local_server() {
            return None;
        }
        space.lookup(target.node_id())
    }

    fn fresh_continuation_point_id(&mut self) -> u64 {
        let id = self.next_continuation_point_id;
        self.next_continuation_point_id = self.next_continuation_point_id.wrapping_add(1);
        id
    }

    /// Resolves and detaches the session's continuation point, checking that the wire handle
    /// belongs to it.
    fn take_continuation_point(
        session: &mut Session,
        handle: &ua::ContinuationPoint,
    ) -> Option<ContinuationPoint> {
        let id = handle.to_identifier()?;
        if session.continuation_point()?.id() != id {
            return None;
        }
        session.release_continuation_point()
    }
}
