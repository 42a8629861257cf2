use pricewatch_core::{Platform, DEFAULT_DISCOUNT, DEFAULT_REVIEWS, NOT_FOUND};

use super::{ProductRules, SearchRules, SiteProfile};
use crate::extract::{FieldRule, Refine, Strategy};

pub(super) const PROFILE: SiteProfile = SiteProfile {
    platform: Platform::Amazon,
    product_markers: &["/dp/", "/gp/", "/product/"],
    title_wait: "#productTitle",
    product: ProductRules {
        title: FieldRule {
            name: "title",
            strategies: &[Strategy::text("#productTitle"), Strategy::text("h1.a-size-large")],
            sentinel: NOT_FOUND,
        },
        // Split whole/fraction is the current layout; the off-screen node is
        // present on nearly every variant but may hold a strike-through price.
        price: FieldRule {
            name: "price",
            strategies: &[
                Strategy::joined("span.a-price-whole", "span.a-price-fraction"),
                Strategy::text("span.a-price[data-a-size='xl'] span.a-offscreen"),
                Strategy::text("#priceblock_ourprice"),
                Strategy::text("#priceblock_dealprice"),
                Strategy::text("span.a-offscreen"),
            ],
            sentinel: NOT_FOUND,
        },
        discount: FieldRule {
            name: "discount",
            strategies: &[Strategy::text("span.savingsPercentage")],
            sentinel: DEFAULT_DISCOUNT,
        },
        rating: FieldRule {
            name: "rating",
            strategies: &[
                Strategy::markup("span.a-icon-alt").then(Refine::FirstToken),
                Strategy::attr("#acrPopover", "title").then(Refine::FirstToken),
            ],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[Strategy::text("#acrCustomerReviewText").then(Refine::LeadingCount)],
            sentinel: DEFAULT_REVIEWS,
        },
    },
    search: SearchRules {
        item: "div[data-component-type='s-search-result']",
        link: &[
            Strategy::attr("h2 a", "href"),
            Strategy::attr("a.a-link-normal.s-no-outline", "href"),
        ],
        title: FieldRule {
            name: "title",
            strategies: &[Strategy::text("h2 a span"), Strategy::text("h2 span")],
            sentinel: NOT_FOUND,
        },
        price: FieldRule {
            name: "price",
            strategies: &[
                Strategy::joined(".a-price .a-price-whole", ".a-price .a-price-fraction"),
                Strategy::text(".a-price .a-offscreen"),
            ],
            sentinel: NOT_FOUND,
        },
        rating: FieldRule {
            name: "rating",
            strategies: &[Strategy::markup("span.a-icon-alt").then(Refine::FirstToken)],
            sentinel: NOT_FOUND,
        },
        reviews: FieldRule {
            name: "reviews",
            strategies: &[
                Strategy::text("span.a-size-base.s-underline-text").then(Refine::LeadingCount)
            ],
            sentinel: DEFAULT_REVIEWS,
        },
    },
};

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
          <span id="productTitle">
            Echo Dot (5th Gen) Smart Speaker
          </span>
          <div class="a-section">
            <span class="a-price" data-a-size="xl">
              <span class="a-offscreen">$49.99</span>
              <span class="a-price-whole">49<span class="a-price-decimal">.</span></span><span class="a-price-fraction">99</span>
            </span>
            <span class="savingsPercentage">-17%</span>
          </div>
          <span id="acrPopover" title="4.7 out of 5 stars">
            <span class="a-icon-alt">4.7 out of 5 stars</span>
          </span>
          <span id="acrCustomerReviewText">12,345 ratings</span>
        </body></html>"#;

    #[test]
    fn product_page_fields() {
        let doc = Html::parse_document(PRODUCT_PAGE);
        let product = PROFILE.extract_product(&doc, "https://www.amazon.com/dp/B09B8V1LZ3");
        assert_eq!(product.platform, Platform::Amazon);
        assert_eq!(product.title, "Echo Dot (5th Gen) Smart Speaker");
        assert_eq!(product.price, "49.99");
        assert_eq!(product.discount, "-17%");
        assert_eq!(product.rating, "4.7");
        assert_eq!(product.reviews, "12,345");
        assert_eq!(product.url, "https://www.amazon.com/dp/B09B8V1LZ3");
    }

    #[test]
    fn legacy_price_block_and_popover_rating() {
        let doc = Html::parse_document(
            r#"<h1 class="a-size-large">Kindle Paperwhite</h1>
               <span id="priceblock_ourprice">$139.99</span>
               <span id="acrPopover" title="4.6 out of 5 stars"></span>"#,
        );
        let product = PROFILE.extract_product(&doc, "https://www.amazon.com/gp/product/B08KTZ8249");
        assert_eq!(product.title, "Kindle Paperwhite");
        assert_eq!(product.price, "$139.99");
        assert_eq!(product.rating, "4.6");
    }

    #[test]
    fn bare_page_uses_sentinels() {
        let doc = Html::parse_document("<html><body><p>Something went wrong</p></body></html>");
        let product = PROFILE.extract_product(&doc, "https://www.amazon.com/dp/X");
        assert_eq!(product.title, NOT_FOUND);
        assert_eq!(product.price, NOT_FOUND);
        assert_eq!(product.discount, "0%");
        assert_eq!(product.rating, NOT_FOUND);
        assert_eq!(product.reviews, "0");
    }

    #[test]
    fn search_card_fields() {
        let item = Html::parse_fragment(
            r#"<div data-component-type="s-search-result" data-asin="B07FZ8S74R">
                 <h2><a class="a-link-normal" href="/Echo-Dot/dp/B07FZ8S74R/ref=sr_1_1">
                   <span>Echo Dot (3rd Gen)</span></a></h2>
                 <span class="a-icon-alt">4.7 out of 5 stars</span>
                 <span class="a-size-base s-underline-text">987,654</span>
                 <span class="a-price"><span class="a-offscreen">$39.99</span>
                   <span class="a-price-whole">39.</span><span class="a-price-fraction">99</span></span>
               </div>"#,
        );
        let product = PROFILE.extract_search_item(&item, "https://www.amazon.com/s?k=echo+dot");
        assert_eq!(product.title, "Echo Dot (3rd Gen)");
        assert_eq!(product.url, "https://www.amazon.com/Echo-Dot/dp/B07FZ8S74R/ref=sr_1_1");
        assert_eq!(product.price, "39.99");
        assert_eq!(product.discount, "0%");
        assert_eq!(product.rating, "4.7");
        assert_eq!(product.reviews, "987,654");
    }

    #[test]
    fn search_card_without_link_points_at_search_page() {
        let item = Html::parse_fragment(
            r#"<div data-component-type="s-search-result"><h2><span>Sponsored</span></h2></div>"#,
        );
        let product = PROFILE.extract_search_item(&item, "https://www.amazon.com/s?k=echo");
        assert_eq!(product.url, "https://www.amazon.com/s?k=echo");
        assert_eq!(product.title, "Sponsored");
        assert_eq!(product.price, NOT_FOUND);
    }
}
