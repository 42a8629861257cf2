use pricewatch_core::{Platform, DEFAULT_DISCOUNT, DEFAULT_REVIEWS, NOT_FOUND};

use super::{ProductRules, SearchRules, SiteProfile};
use crate::extract::{FieldRule, Refine, Strategy};

// Search cards use hashed class names (`multi--titleText--nXeOvyr`), so they
// are matched on the stable prefix.
pub(super) const PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Aliexpress,
    product_markers: &["/item/"],
    title_wait: "h1.product-title-text",
    product: ProductRules {
        title: FieldRule {
            name: "title",
            strategies: &[
                Strategy::text("h1.product-title-text"),
                Strategy::text("h1[data-pl='product-title']"),
            ],
            sentinel: NOT_FOUND,
        },
        price: FieldRule {
            name: "price",
            strategies: &[
                Strategy::text("div.product-price-current"),
                Strategy::text("span.price"),
            ],
            sentinel: NOT_FOUND,
        },
        discount: FieldRule {
            name: "discount",
            strategies: &[Strategy::text("span.price-discount-percentage")],
            sentinel: DEFAULT_DISCOUNT,
        },
        rating: FieldRule {
            name: "rating",
            strategies: &[Strategy::text("span.overview-rating-average")],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[
                Strategy::text("span.product-reviewer-reviews").then(Refine::LeadingCount)
            ],
            sentinel: DEFAULT_REVIEWS,
        },
    },
    search: SearchRules {
        item: "[class*='search-item-card-wrapper']",
        link: &[Strategy::attr("a[href*='/item/']", "href")],
        title: FieldRule {
            name: "title",
            strategies: &[Strategy::text("h3"), Strategy::text("[class*='multi--titleText']")],
            sentinel: NOT_FOUND,
        },
        price: FieldRule {
            name: "price",
            strategies: &[Strategy::text("[class*='multi--price-sale']")],
            sentinel: NOT_FOUND,
        },
        rating: FieldRule {
            name: "rating",
            strategies: &[Strategy::text("[class*='multi--evaluation']")],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[],
            sentinel: DEFAULT_REVIEWS,
        },
    },
};
