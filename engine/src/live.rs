//! The host's live view of docked entries.

use std::collections::HashMap;

use dockorder_types::{GroupKey, Region, Token};

use crate::error::EngineError;
use crate::intercept::InsertionStrategy;

/// What the engine may ask of, and do to, the host's docked entries.
///
/// All visual indices are left-to-right in every region. Lookups that find
/// nothing mean "not currently present"; mutating a token the host no longer
/// has is a no-op.
pub trait LiveSet {
    /// Tokens docked in `region`, left to right.
    fn children(&self, region: Region) -> Vec<Token>;

    fn region_of(&self, token: &Token) -> Option<Region>;

    /// Aggregator the entry belongs to, if the host marks it as grouped.
    fn group_key(&self, token: &Token) -> Option<GroupKey>;

    /// Reposition a child of `region` to `index`.
    fn move_child(&mut self, region: Region, token: &Token, index: usize);

    /// Reparent an entry into `region` at `index`.
    fn relocate(&mut self, token: &Token, region: Region, index: usize);
}

/// Host model kept entirely in memory. Embedders without a widget tree use
/// it directly; tests script dock events against it.
#[derive(Debug, Default, Clone)]
pub struct MemoryLiveSet {
    regions: HashMap<Region, Vec<Token>>,
    groups: HashMap<Token, GroupKey>,
}

impl MemoryLiveSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `token` as a member of `key`'s aggregator.
    pub fn set_group(&mut self, token: Token, key: GroupKey) {
        self.groups.insert(token, key);
    }

    /// Dock `token` at `index` (clamped), taking it out of any other region.
    pub fn dock_at(&mut self, token: Token, region: Region, index: usize) {
        self.undock(&token);
        let children = self.regions.entry(region).or_default();
        let index = index.min(children.len());
        children.insert(index, token);
    }

    /// Dock through the host's insertion hook, the way a real host must.
    /// Returns the index the entry landed at.
    pub fn dock_via(
        &mut self,
        strategy: &mut dyn InsertionStrategy,
        token: Token,
        region: Region,
    ) -> Result<usize, EngineError> {
        self.undock(&token);
        let index = strategy.insertion_index(&token, region, &*self)?;
        let index = index.min(self.regions.get(&region).map_or(0, Vec::len));
        self.dock_at(token, region, index);
        Ok(index)
    }

    /// Remove `token`, returning the region it was docked in.
    pub fn undock(&mut self, token: &Token) -> Option<Region> {
        let region = self.region_of(token)?;
        if let Some(children) = self.regions.get_mut(&region) {
            children.retain(|t| t != token);
        }
        Some(region)
    }
}

impl LiveSet for MemoryLiveSet {
    fn children(&self, region: Region) -> Vec<Token> {
        self.regions.get(&region).cloned().unwrap_or_default()
    }

    fn region_of(&self, token: &Token) -> Option<Region> {
        Region::ALL.into_iter().find(|region| {
            self.regions
                .get(region)
                .is_some_and(|children| children.contains(token))
        })
    }

    fn group_key(&self, token: &Token) -> Option<GroupKey> {
        self.groups.get(token).cloned()
    }

    fn move_child(&mut self, region: Region, token: &Token, index: usize) {
        let Some(children) = self.regions.get_mut(&region) else {
            return;
        };
        let Some(from) = children.iter().position(|t| t == token) else {
            return;
        };
        let token = children.remove(from);
        let index = index.min(children.len());
        children.insert(index, token);
    }

    fn relocate(&mut self, token: &Token, region: Region, index: usize) {
        if self.region_of(token).is_some() {
            self.dock_at(token.clone(), region, index);
        }
    }
}
