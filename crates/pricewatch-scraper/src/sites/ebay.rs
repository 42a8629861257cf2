use pricewatch_core::{Platform, DEFAULT_DISCOUNT, DEFAULT_REVIEWS, NOT_FOUND};

use super::{ProductRules, SearchRules, SiteProfile};
use crate::extract::{FieldRule, Refine, Strategy};

pub(super) const PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Ebay,
    product_markers: &["/itm/"],
    title_wait: "h1.x-item-title__mainTitle",
    product: ProductRules {
        title: FieldRule {
            name: "title",
            strategies: &[
                Strategy::text("h1.x-item-title__mainTitle"),
                Strategy::text("h1#itemTitle").then(Refine::StripPrefix("Details about")),
            ],
            sentinel: NOT_FOUND,
        },
        price: FieldRule {
            name: "price",
            strategies: &[Strategy::text("div.x-price-primary"), Strategy::text("span#prcIsum")],
            sentinel: NOT_FOUND,
        },
        // Listings do not expose a markdown percentage.
        discount: FieldRule {
            name: "discount",
            strategies: &[],
            sentinel: DEFAULT_DISCOUNT,
        },
        rating: FieldRule {
            name: "rating",
            strategies: &[Strategy::text("div.x-seller-rating").then(Refine::FirstToken)],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[Strategy::text("span#si-fb").then(Refine::LeadingCount)],
            sentinel: DEFAULT_REVIEWS,
        },
    },
    search: SearchRules {
        item: "li.s-item",
        link: &[Strategy::attr("a.s-item__link", "href")],
        title: FieldRule {
            name: "title",
            strategies: &[
                Strategy::text(".s-item__title span[role='heading']"),
                Strategy::text(".s-item__title"),
            ],
            sentinel: NOT_FOUND,
        },
        price: FieldRule {
            name: "price",
            strategies: &[Strategy::text(".s-item__price")],
            sentinel: NOT_FOUND,
        },
        rating: FieldRule {
            name: "rating",
            strategies: &[Strategy::text(".x-star-rating span.clipped").then(Refine::FirstToken)],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[Strategy::text(".s-item__reviews-count span").then(Refine::LeadingCount)],
            sentinel: DEFAULT_REVIEWS,
        },
    },
};
