//! Product variations and the customer's colour/size/zone selection.
//!
//! Commerce backends describe variations with loosely named attributes
//! (`pa_color`, `pa_talla`, ...). They are resolved into [`Variation`] once at
//! the boundary; everything downstream works with typed fields.
//!
//! [`group_by_color`], [`size_options`], [`QuantitySelection`] and
//! [`ZoneSelection`] hold the state of an interactive product page. The
//! storefront API and the CLI take finished quantities and zones, so front
//! ends embedding this crate drive these types directly; the CLI only uses
//! [`ZoneSelection::with_default`] to show the preselected zone.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock figure used for in-stock variations that do not track a quantity.
pub const UNLIMITED_STOCK: u32 = 9999;

/// Size label for variations without a size attribute.
pub const ONE_SIZE: &str = "Única";

/// Variation attributes the selection flow understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Color,
    Size,
}

impl AttributeKind {
    /// Classify a raw attribute name. Unrelated attributes return `None`.
    #[must_use]
    pub fn from_attribute_name(name: &str) -> Option<Self> {
        match name.trim() {
            "pa_color" => Some(Self::Color),
            "pa_size" | "pa_talla" => Some(Self::Size),
            _ => None,
        }
    }
}

/// Raw `name`/`value` attribute pair as delivered by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttribute {
    pub name: String,
    pub value: String,
}

impl RawAttribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Variation stock status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    OnBackorder,
}

/// One purchasable colour/size combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub stock_status: StockStatus,
    pub stock_quantity: Option<u32>,
    /// Variation-specific catalog price, when it differs from the product's.
    pub price: Option<Decimal>,
    pub image: Option<String>,
}

impl Variation {
    /// Build a variation from raw attributes.
    ///
    /// The first attribute of each kind wins; blank values count as absent.
    pub fn from_attributes<'a, I>(
        id: impl Into<String>,
        attributes: I,
        stock_status: StockStatus,
        stock_quantity: Option<u32>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a RawAttribute>,
    {
        let mut color = None;
        let mut size = None;
        for attribute in attributes {
            let value = attribute.value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match AttributeKind::from_attribute_name(&attribute.name) {
                Some(AttributeKind::Color) => &mut color,
                Some(AttributeKind::Size) => &mut size,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_owned());
            }
        }

        Self {
            id: id.into(),
            color,
            size,
            stock_status,
            stock_quantity,
            price: None,
            image: None,
        }
    }

    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Units that can be ordered.
    ///
    /// In-stock variations without a tracked quantity count as
    /// [`UNLIMITED_STOCK`]; any other missing quantity counts as zero.
    #[must_use]
    pub fn effective_stock(&self) -> u32 {
        match (self.stock_status, self.stock_quantity) {
            (StockStatus::InStock, None) => UNLIMITED_STOCK,
            (_, quantity) => quantity.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_status == StockStatus::OutOfStock || self.stock_quantity == Some(0)
    }

    #[must_use]
    pub fn size_label(&self) -> &str {
        self.size.as_deref().unwrap_or(ONE_SIZE)
    }
}

/// A selectable colour with its aggregated stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorOption {
    pub color: String,
    /// Image of the first variation seen in this colour.
    pub image: Option<String>,
    pub stock: u32,
    pub out_of_stock: bool,
}

/// Group variations by colour, in the order colours first appear.
///
/// Variations without a colour are skipped.
#[must_use]
pub fn group_by_color(variations: &[Variation]) -> Vec<ColorOption> {
    let mut options: Vec<ColorOption> = Vec::new();
    for variation in variations {
        let Some(color) = variation.color.as_deref() else {
            continue;
        };
        let stock = variation.effective_stock();
        match options.iter_mut().find(|option| option.color == color) {
            Some(option) => {
                option.stock = option.stock.saturating_add(stock);
                option.out_of_stock &= variation.is_out_of_stock();
            }
            None => options.push(ColorOption {
                color: color.to_owned(),
                image: variation.image.clone(),
                stock,
                out_of_stock: variation.is_out_of_stock(),
            }),
        }
    }
    options
}

/// One row of the per-size quantity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub size: String,
    pub variation_id: String,
    pub stock_status: StockStatus,
    pub stock: u32,
    /// Variation price, or the product price when the variation has none.
    pub price: Decimal,
}

/// Size rows for one colour, in variation order.
#[must_use]
pub fn size_options(
    variations: &[Variation],
    color: &str,
    product_price: Decimal,
) -> Vec<SizeOption> {
    variations
        .iter()
        .filter(|variation| variation.color.as_deref() == Some(color))
        .map(|variation| SizeOption {
            size: variation.size_label().to_owned(),
            variation_id: variation.id.clone(),
            stock_status: variation.stock_status,
            stock: variation.effective_stock(),
            price: variation.price.unwrap_or(product_price),
        })
        .collect()
}

/// Units requested per size, bounded by each size's stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantitySelection {
    stock: BTreeMap<String, u32>,
    quantities: BTreeMap<String, u32>,
}

impl QuantitySelection {
    /// Empty selection over the given size rows.
    #[must_use]
    pub fn new(options: &[SizeOption]) -> Self {
        Self {
            stock: options
                .iter()
                .map(|option| (option.size.clone(), option.stock))
                .collect(),
            quantities: BTreeMap::new(),
        }
    }

    /// Set the units for a size, clamped to `[0, stock]`.
    ///
    /// Returns the stored quantity, or `None` when the size is not offered.
    pub fn set(&mut self, size: &str, requested: i64) -> Option<u32> {
        let stock = *self.stock.get(size)?;
        let quantity = u32::try_from(requested.max(0)).map_or(stock, |q| q.min(stock));
        if quantity == 0 {
            self.quantities.remove(size);
        } else {
            self.quantities.insert(size.to_owned(), quantity);
        }
        Some(quantity)
    }

    #[must_use]
    pub fn get(&self, size: &str) -> u32 {
        self.quantities.get(size).copied().unwrap_or(0)
    }

    /// Total units across sizes; the quantity the engine prices.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.quantities
            .values()
            .fold(0, |total, quantity| total.saturating_add(*quantity))
    }

    /// Non-zero quantities by size.
    #[must_use]
    pub const fn quantities(&self) -> &BTreeMap<String, u32> {
        &self.quantities
    }

    /// Drop every quantity, e.g. after the customer switches colour.
    pub fn clear(&mut self) {
        self.quantities.clear();
    }
}

/// Customization zones in the order the customer picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneSelection(Vec<String>);

impl ZoneSelection {
    /// Selection preloaded with the first legal zone, if any.
    #[must_use]
    pub fn with_default(allowed: &[String]) -> Self {
        Self(allowed.first().cloned().into_iter().collect())
    }

    /// Add the zone if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, zone: &str) -> bool {
        if let Some(index) = self.0.iter().position(|selected| selected == zone) {
            self.0.remove(index);
            false
        } else {
            self.0.push(zone.to_owned());
            true
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
