//! Production pricing data compiled into the binary.
//!
//! Method switches, minimums and multipliers change by redeploying; a YAML
//! catalog can replace this data at runtime (see
//! [`PricingCatalog::from_yaml`]).

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::catalog::PricingCatalog;
use super::family::{ClassificationTable, FamilyTable, PricingFamily};
use super::formula::{PricingFamilyFormula, ScalingSteps};
use super::method::{MethodCatalog, PricingStrategy, PrintingMethod, PrintingMethodId};
use super::policy::FamilyPrintingPolicy;
use super::zones::CategoryZoneOverride;

use PrintingMethodId::{Dtf, DtfUv, Embroidery, NoPrint, PadPrintOneColor, ScreenPrintOneColor};

const FRONT: &str = "frontal";
const BACK: &str = "espalda";
const LEFT_SLEEVE: &str = "manga_izquierda";
const RIGHT_SLEEVE: &str = "manga_derecha";
const FRONT_FACE: &str = "frente";

const fn d(num: u32, scale: u32) -> Decimal {
    Decimal::from_parts(num, 0, 0, false, scale)
}

const APPAREL_CATEGORIES: &[&str] = &[
    "t_shirts",
    "cam",
    "cam_w",
    "cat",
    "camisetas-manga-corta",
    "sp_tshi",
    "industrytshirts",
    "serviciostshirts",
    "highvistshirts",
    "pol_s",
    "pol_l",
    "swe",
    "hoodies",
    "cha",
    "chuba",
    "coats",
    "w_coats",
    "subcoats",
    "raincoats",
    "windbreak",
    "pan",
    "trousers",
    "mono",
    "chnd",
    "servicioschalecos",
    "highvischalecos",
    "sanitarybata",
    "foodindustrybata",
    "horecachaqueta",
    "horecacamisas",
    "horecadelantal",
    "sanitarycasaca",
    "sanitarygorro",
    "foodindustrygorro",
    "industryjackets",
    "servicioschaqutas",
    "highvischaquetas",
];

const ACCESSORY_CATEGORIES: &[&str] = &[
    "bags",
    "sub_bags",
    "drawstring_bag",
    "bags_coolers",
    "bags_travel",
    "waterproof_dry_bags",
    "summer_cooler_bags",
    "subbackpacks",
    "backpacks",
    "gor",
    "hats",
    "travel_caps",
    "christmas_hats",
    "gloves",
    "neckwarmer",
    "travel_accessories",
    "travel_adaptors",
    "sunglasses",
    "subsunglasses",
    "sunglasses_pouches",
    "tech_accessories",
    "wireless_charger",
    "car_charger",
    "chargers",
    "earphones",
    "headphones",
    "speakers",
    "mouse_pad",
    "acc",
    "sport_accessories",
    "acc_outdoor",
    "take_away",
    "pets_accessories",
];

const HOME_CATEGORIES: &[&str] = &[
    "mugs",
    "submugs",
    "cup_warmer",
    "bottles",
    "bottles_thermos_flas",
    "glass_bottles",
    "thermos_flasks",
    "sports_bottles",
    "home_gifts",
    "kitchen",
    "home_cocktail",
    "decoration",
    "decoration_games",
    "decorations",
];

const STATIONERY_CATEGORIES: &[&str] = &[
    "ball_pens",
    "notebooks",
    "pencil_cases",
    "diaries_calendars",
    "writing",
    "writing_office",
];

const FULL_GARMENT_ZONES: &[&str] = &[FRONT, BACK, LEFT_SLEEVE, RIGHT_SLEEVE];

const ZONE_OVERRIDES: &[(&str, &[&str])] = &[
    ("camisetas-personalizadas", FULL_GARMENT_ZONES),
    ("polos-personalizados", FULL_GARMENT_ZONES),
    ("sudaderas-personalizadas", FULL_GARMENT_ZONES),
    ("chaquetas-personalizadas", FULL_GARMENT_ZONES),
    ("bolsas-personalizadas", &[FRONT, BACK]),
    ("gorras-personalizadas", &[FRONT, BACK]),
    ("llaveros-personalizados", &[FRONT]),
];

pub(super) fn catalog() -> PricingCatalog {
    PricingCatalog {
        methods: methods(),
        categories: categories(),
        policies: policies(),
        overrides: ZONE_OVERRIDES
            .iter()
            .map(|(category, zones)| {
                (*category, CategoryZoneOverride::zones(zones.iter().copied()))
            })
            .collect(),
        formulas: formulas(),
    }
}

fn method(
    id: PrintingMethodId,
    label: &str,
    description: &str,
    pricing_type: PricingStrategy,
    is_active: bool,
    notes: &str,
) -> PrintingMethod {
    PrintingMethod {
        id,
        label: label.to_owned(),
        description: description.to_owned(),
        pricing_type,
        is_active,
        notes: Some(notes.to_owned()),
    }
}

fn methods() -> MethodCatalog {
    MethodCatalog::new(vec![
        method(
            Dtf,
            "DTF Full Color",
            "Impresión digital a todo color, ideal para logos con muchos detalles y gradientes.",
            PricingStrategy::FlatPerZone,
            true,
            "Método principal. Reutiliza la fórmula de precios por zona.",
        ),
        method(
            ScreenPrintOneColor,
            "Serigrafía 1 color",
            "Serigrafía clásica, óptima para pedidos medios/grandes con diseños de 1 color.",
            PricingStrategy::ColorCount,
            false,
            "Inactivo. Fórmula de precios pendiente de definir.",
        ),
        method(
            Embroidery,
            "Bordado Textil",
            "Bordado textil, ideal para prendas premium y acabados duraderos.",
            PricingStrategy::FlatPerZone,
            false,
            "Inactivo. Disponible para textil (ropa, accesorios).",
        ),
        method(
            DtfUv,
            "DTF UV",
            "Impresión DTF con curado UV, ideal para productos rígidos (tazas, botellas, etc.).",
            PricingStrategy::FlatPerZone,
            false,
            "Inactivo. Disponible para rígidos (hogar, papelería).",
        ),
        method(
            PadPrintOneColor,
            "Tampografía 1 color",
            "Tampografía clásica, óptima para volúmenes grandes en productos rígidos.",
            PricingStrategy::ColorCount,
            false,
            "Inactivo. Disponible para rígidos (hogar, papelería).",
        ),
        method(
            NoPrint,
            "Solo prenda, sin impresión",
            "Solo la prenda sin personalización.",
            PricingStrategy::FlatPerZone,
            false,
            "Inactivo. Fórmula de precios pendiente de definir.",
        ),
    ])
}

fn categories() -> ClassificationTable {
    [
        (APPAREL_CATEGORIES, PricingFamily::Apparel),
        (ACCESSORY_CATEGORIES, PricingFamily::Accessories),
        (HOME_CATEGORIES, PricingFamily::HomeGoods),
        (STATIONERY_CATEGORIES, PricingFamily::Stationery),
    ]
    .into_iter()
    .flat_map(|(categories, family)| categories.iter().map(move |category| (*category, family)))
    .collect()
}

fn policy(
    methods: &[PrintingMethodId],
    active_in_ui: &[PrintingMethodId],
    minimums: &[(PrintingMethodId, u32)],
) -> FamilyPrintingPolicy {
    FamilyPrintingPolicy {
        methods: methods.to_vec(),
        active_in_ui: active_in_ui.to_vec(),
        min_qty_by_method: minimums.iter().copied().collect(),
    }
}

fn policies() -> FamilyTable<FamilyPrintingPolicy> {
    FamilyTable {
        apparel: policy(
            &[Dtf, ScreenPrintOneColor, Embroidery],
            &[Dtf],
            &[(Dtf, 25), (ScreenPrintOneColor, 50), (Embroidery, 25)],
        ),
        accessories: policy(
            &[Dtf, ScreenPrintOneColor, Embroidery],
            &[Dtf],
            &[(Dtf, 50), (ScreenPrintOneColor, 100), (Embroidery, 50)],
        ),
        home_goods: policy(
            &[DtfUv, PadPrintOneColor],
            &[],
            &[(DtfUv, 20), (PadPrintOneColor, 100)],
        ),
        stationery: policy(
            &[DtfUv, PadPrintOneColor],
            &[],
            &[(DtfUv, 100), (PadPrintOneColor, 250)],
        ),
        other: policy(&[Dtf], &[Dtf], &[(Dtf, 10)]),
    }
}

fn formula(
    label: &str,
    min_quantity: u32,
    steps: &[(u32, Decimal)],
    zone_cost: &[(&str, Decimal)],
    notes: &str,
) -> PricingFamilyFormula {
    PricingFamilyFormula {
        label: label.to_owned(),
        min_quantity,
        scaling_steps: ScalingSteps::from_trusted(steps),
        zone_cost: zone_cost
            .iter()
            .map(|(zone, cost)| ((*zone).to_owned(), *cost))
            .collect::<BTreeMap<_, _>>(),
        zones_allowed: zone_cost.iter().map(|(zone, _)| (*zone).to_owned()).collect(),
        notes: notes.to_owned(),
    }
}

fn formulas() -> FamilyTable<PricingFamilyFormula> {
    FamilyTable {
        apparel: formula(
            "Ropa Personalizada",
            25,
            &[
                (25, d(516, 2)),
                (50, d(369, 2)),
                (100, d(247, 2)),
                (250, d(185, 2)),
                (500, d(132, 2)),
                (1000, d(1, 0)),
                (2000, d(89, 2)),
            ],
            &[
                (FRONT, d(45, 2)),
                (BACK, d(40, 2)),
                (LEFT_SLEEVE, d(50, 2)),
                (RIGHT_SLEEVE, d(50, 2)),
            ],
            "Precios DTF, IVA incluido. Personalización full color.",
        ),
        accessories: formula(
            "Accesorios Personalizados",
            50,
            &[
                (50, d(450, 2)),
                (100, d(3, 0)),
                (250, d(2, 0)),
                (500, d(150, 2)),
                (1000, d(1, 0)),
                (2000, d(90, 2)),
            ],
            &[(FRONT, d(60, 2)), (BACK, d(50, 2))],
            "Precios DTF, IVA incluido. Cantidad mínima 50 unidades.",
        ),
        home_goods: formula(
            "Artículos para el Hogar",
            20,
            &[
                (20, d(6, 0)),
                (50, d(4, 0)),
                (100, d(25, 1)),
                (250, d(18, 1)),
                (500, d(14, 1)),
                (1000, d(1, 0)),
                (2000, d(9, 1)),
            ],
            &[(FRONT, d(30, 2))],
            "Precios DTF, IVA incluido. Cantidad mínima 20 unidades.",
        ),
        stationery: formula(
            "Papelería Personalizada",
            100,
            &[
                (100, d(5, 0)),
                (250, d(35, 1)),
                (500, d(25, 1)),
                (1000, d(15, 1)),
                (2000, d(1, 0)),
            ],
            &[(FRONT_FACE, d(20, 2))],
            "Precios DTF, IVA incluido. Cantidad mínima 100 unidades.",
        ),
        other: formula(
            "Otros Productos",
            10,
            &[
                (10, d(516, 2)),
                (25, d(369, 2)),
                (50, d(297, 2)),
                (100, d(213, 2)),
                (250, d(167, 2)),
                (500, d(132, 2)),
                (1000, d(1, 0)),
                (2000, d(89, 2)),
            ],
            &[
                (FRONT, d(50, 2)),
                (BACK, d(45, 2)),
                (LEFT_SLEEVE, d(50, 2)),
                (RIGHT_SLEEVE, d(50, 2)),
            ],
            "Precios DTF por defecto, IVA incluido.",
        ),
    }
}
