use pricewatch_core::{Platform, DEFAULT_DISCOUNT, DEFAULT_REVIEWS, NOT_FOUND};

use super::{ProductRules, SearchRules, SiteProfile};
use crate::extract::{FieldRule, Refine, Strategy};

pub(super) const PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Jumia,
    product_markers: &["/catalog/", "/product/"],
    title_wait: "h1.-fs20.-pts.-pbxs",
    product: ProductRules {
        title: FieldRule {
            name: "title",
            strategies: &[Strategy::text("h1.-fs20.-pts.-pbxs")],
            sentinel: NOT_FOUND,
        },
        price: FieldRule {
            name: "price",
            strategies: &[Strategy::text("span.-b.-ltr.-tal.-fs24")],
            sentinel: NOT_FOUND,
        },
        discount: FieldRule {
            name: "discount",
            strategies: &[
                Strategy::text("span.bdg._dsct._dyn.-mls"),
                Strategy::text("span.bdg._dsct"),
            ],
            sentinel: DEFAULT_DISCOUNT,
        },
        // The filled star bar carries the rating as an inline width.
        rating: FieldRule {
            name: "rating",
            strategies: &[
                Strategy::attr("div.stars._m._al", "style").then(Refine::StarWidth),
                Strategy::attr("div.stars._m._al div.in", "style").then(Refine::StarWidth),
            ],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[Strategy::text("a.-plxs._more").then(Refine::LeadingCount)],
            sentinel: DEFAULT_REVIEWS,
        },
    },
    search: SearchRules {
        item: "article.prd",
        link: &[Strategy::attr("a.core", "href")],
        title: FieldRule {
            name: "title",
            strategies: &[Strategy::text("h3.name"), Strategy::text(".name")],
            sentinel: NOT_FOUND,
        },
        price: FieldRule {
            name: "price",
            strategies: &[Strategy::text("div.prc")],
            sentinel: NOT_FOUND,
        },
        rating: FieldRule {
            name: "rating",
            strategies: &[
                Strategy::attr("div.stars._s div.in", "style").then(Refine::StarWidth),
                Strategy::text("div.stars._s").then(Refine::FirstToken),
            ],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[Strategy::text("div.rev").then(Refine::ParenCount)],
            sentinel: DEFAULT_REVIEWS,
        },
    },
};
