use std::collections::HashMap;

use kdimap_types::{AssetIdentity, KdiAsset, KdiDocument, KdiVuln, KdiVulnDef};

/// Position of an asset inside a [`KdiAggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetHandle(usize);

/// Accumulates assets, their vulnerabilities and the definitions they refer to.
///
/// Assets are never merged. Definitions are unique by `scanner_identifier`: a
/// repeated identifier replaces the stored definition but keeps its original
/// position.
#[derive(Debug, Default)]
pub struct KdiAggregator {
    assets: Vec<KdiAsset>,
    vuln_defs: Vec<KdiVulnDef>,
    def_index: HashMap<String, usize>,
}

impl KdiAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_asset(&mut self, identity: AssetIdentity) -> AssetHandle {
        self.assets.push(KdiAsset::new(identity));
        AssetHandle(self.assets.len() - 1)
    }

    pub fn add_vuln(&mut self, asset: AssetHandle, vuln: KdiVuln) {
        self.assets[asset.0].vulns.push(vuln);
    }

    pub fn upsert_vuln_def(&mut self, def: KdiVulnDef) {
        match self.def_index.get(&def.scanner_identifier) {
            Some(&pos) => self.vuln_defs[pos] = def,
            None => {
                self.def_index
                    .insert(def.scanner_identifier.clone(), self.vuln_defs.len());
                self.vuln_defs.push(def);
            }
        }
    }

    pub fn asset(&self, handle: AssetHandle) -> &KdiAsset {
        &self.assets[handle.0]
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn vuln_def_count(&self) -> usize {
        self.vuln_defs.len()
    }

    pub fn into_document(self, skip_autoclose: bool) -> KdiDocument {
        KdiDocument {
            skip_autoclose,
            assets: self.assets,
            vuln_defs: self.vuln_defs,
        }
    }
}
