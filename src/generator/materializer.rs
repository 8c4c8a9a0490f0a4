//! Build and insert the records a spec creates
//!
//! The materializer is the only step that introduces new ids into the
//! catalog namespace. All outputs are computed before anything is
//! inserted, so a failing spec leaves the catalog untouched.

use serde_json::{Map, Number};

use crate::catalog::{Catalog, GridDef, HandbookEntry, ItemTemplate};
use crate::core::error::{GenerationError, Result};
use crate::spec::NewEntitySpec;

use super::resolver::AliasTable;

/// What a spec added to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedEntity {
    pub item: ItemTemplate,
    pub handbook: HandbookEntry,
    /// Languages that received name/short name/description keys
    pub locales: Vec<String>,
}

/// Locale keys written for every new record
pub fn locale_keys(id: &str) -> [String; 3] {
    [
        format!("{} Name", id),
        format!("{} ShortName", id),
        format!("{} Description", id),
    ]
}

/// Clone `template` into `new_id` and insert the record, handbook entry,
/// flea price and locale entries
pub fn materialize(
    catalog: &mut Catalog,
    aliases: &AliasTable,
    fallback_locale: &str,
    new_id: &str,
    spec: &NewEntitySpec,
    template: &ItemTemplate,
    grids: Option<Vec<GridDef>>,
) -> Result<MaterializedEntity> {
    if catalog.contains_item(new_id) {
        return Err(GenerationError::IdCollision(new_id.to_string()));
    }

    let mut item = template.clone();
    item.id = new_id.to_string();
    item.parent = template.parent.clone();
    item.props.apply_overrides(&spec.override_properties)?;
    if let Some(grids) = grids {
        item.props.grids = Some(grids);
    }

    let handbook = match &spec.handbook {
        Some(hb) => HandbookEntry {
            id: new_id.to_string(),
            parent_id: aliases.handbook_parent(&hb.parent).to_string(),
            price: Number::from(hb.price),
            extra: Map::new(),
        },
        None => {
            let base = catalog
                .handbook_entry(&template.id)
                .ok_or_else(|| GenerationError::MissingHandbookEntry(template.id.clone()))?;
            HandbookEntry {
                id: new_id.to_string(),
                parent_id: base.parent_id.clone(),
                price: base.price.clone(),
                extra: Map::new(),
            }
        }
    };

    let languages: Vec<String> = catalog.locale_languages().cloned().collect();
    let [name_key, short_key, desc_key] = locale_keys(new_id);
    let mut locales = Vec::with_capacity(languages.len());
    for language in languages {
        let Some(strings) = spec.locale_for(&language, fallback_locale) else {
            continue;
        };
        if let Some(table) = catalog.locale_mut(&language) {
            table.insert(name_key.clone(), strings.name.clone());
            table.insert(short_key.clone(), strings.short_name.clone());
            table.insert(desc_key.clone(), strings.description.clone());
            locales.push(language);
        }
    }
    if locales.is_empty() {
        tracing::warn!("{}: no locale strings written", new_id);
    }

    catalog.insert_item(item.clone());
    catalog.push_handbook(handbook.clone());
    catalog.set_price(new_id, handbook.price.clone());

    Ok(MaterializedEntity {
        item,
        handbook,
        locales,
    })
}
