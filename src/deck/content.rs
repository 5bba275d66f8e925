use super::{BadgeVariant, Block, Card, Icon, SlideDefinition, Tone};

pub(super) fn slides() -> Vec<SlideDefinition> {
    vec![
        introduction(),
        overview(),
        fetching_products(),
        categories_and_brands(),
        product_variants(),
        pricing(),
        cart_management(),
        checkout(),
        queries_and_mutations(),
        error_handling(),
    ]
}

fn introduction() -> SlideDefinition {
    SlideDefinition::new(
        "BigCommerce GraphQL Deep Dive",
        Icon::Globe,
        vec![
            Block::lead("🌐 Complete Guide to GraphQL Storefront API"),
            Block::muted("Master the art of building headless storefronts with BigCommerce GraphQL API"),
            Block::features([
                (Icon::Database, "Products & Categories", None),
                (Icon::ShoppingCart, "Cart Management", None),
                (Icon::Zap, "Performance", None),
                (Icon::Settings, "Error Handling", None),
            ]),
        ],
    )
}

fn overview() -> SlideDefinition {
    SlideDefinition::new(
        "Overview of BigCommerce GraphQL Storefront API",
        Icon::Code,
        vec![
            Card::new("What is BigCommerce GraphQL API?")
                .icon(Icon::Code)
                .tone(Tone::Primary)
                .body(vec![Block::labeled(
                    BadgeVariant::Secondary,
                    [
                        ("API", "A GraphQL API provided by BigCommerce for headless storefronts"),
                        ("Frontend", "Allows React, Next.js, etc. to query exactly the data needed"),
                        ("Performance", "Reduces over-fetching and under-fetching of data"),
                        ("Use Cases", "Powers custom storefronts, mobile apps, and integrations"),
                    ],
                )])
                .into(),
            Card::new("❌ REST API Challenges")
                .tone(Tone::Destructive)
                .body(vec![Block::text("Multiple API calls needed (products → inventory → pricing separately)")])
                .into(),
            Card::new("✅ GraphQL Advantages")
                .tone(Tone::Accent)
                .body(vec![Block::text("One request with specified fields → faster page load")])
                .into(),
            Card::new("🔑 Key Capabilities")
                .body(vec![Block::features([
                    (Icon::Database, "Products & Categories", Some("PLPs, filters, menus")),
                    (Icon::Settings, "Product Details", Some("Variants, pricing, inventory")),
                    (Icon::ShoppingCart, "Cart & Checkout", Some("Full e-commerce flow")),
                ])])
                .into(),
        ],
    )
}

fn fetching_products() -> SlideDefinition {
    SlideDefinition::new(
        "Fetching Products",
        Icon::Database,
        vec![
            Card::new("Products Query")
                .icon(Icon::Database)
                .tone(Tone::Primary)
                .body(vec![
                    Block::badges(BadgeVariant::Outline, ["Entry point: site.products"]),
                    Block::muted("Perfect for product listing pages (PLPs), search results, and recommendations"),
                    Block::muted("✨ Supports pagination, filters, and sorting"),
                    Block::code(
                        r#"query GetProducts {
  site {
    products(first: 5) {
      edges {
        node {
          entityId
          name
          description
          prices {
            price { value currencyCode }
            salePrice { value currencyCode }
          }
        }
      }
    }
  }
}"#,
                    ),
                    Block::heading("📤 Output"),
                    Block::text("Returns product ID, name, description, and pricing information"),
                ])
                .into(),
        ],
    )
}

fn categories_and_brands() -> SlideDefinition {
    SlideDefinition::new(
        "Fetching Categories & Brands",
        Icon::Settings,
        vec![
            Card::new("Categories")
                .icon(Icon::Settings)
                .tone(Tone::Primary)
                .body(vec![
                    Block::badges(BadgeVariant::Outline, ["Entry point: site.categories"]),
                    Block::muted("Essential for menus, navigation, and faceted filters"),
                    Block::code(
                        r#"query GetCategories {
  site {
    categoryTree {
      name
      path
      entityId
    }
  }
}"#,
                    ),
                    Block::text("📤 Returns nested category structure"),
                ])
                .into(),
            Card::new("Brands")
                .icon(Icon::Globe)
                .tone(Tone::Accent)
                .body(vec![
                    Block::badges(BadgeVariant::Outline, ["Entry point: site.brands"]),
                    Block::muted("Perfect for \"Shop by Brand\" pages and filters"),
                    Block::code(
                        r#"query GetBrands {
  site {
    brands(first: 5) {
      edges {
        node {
          name
          entityId
        }
      }
    }
  }
}"#,
                    ),
                    Block::text("📤 Returns brand IDs and names"),
                ])
                .into(),
        ],
    )
}

fn product_variants() -> SlideDefinition {
    SlideDefinition::new(
        "Product Detail Pages - Variants",
        Icon::Zap,
        vec![
            Card::new("Product Variants & Options")
                .icon(Icon::Zap)
                .tone(Tone::Primary)
                .body(vec![
                    Block::heading("💡 What are Variants?"),
                    Block::bullets([
                        "Different options of a product (size, color, material)",
                        "Stored under product.variants",
                        "Essential for PDPs to allow correct option selection",
                    ]),
                    Block::code(
                        r#"query ProductVariants($id: Int!) {
  site {
    product(entityId: $id) {
      name
      variants(first: 5) {
        edges {
          node {
            entityId
            sku
            options {
              edges {
                node {
                  displayName
                  values {
                    edges {
                      node { label }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}"#,
                    ),
                    Block::heading("📤 Example Output"),
                    Block::text("Shows available options like:"),
                    Block::badges(BadgeVariant::Default, ["Size: S, M, L", "Color: Red, Blue"]),
                ])
                .into(),
        ],
    )
}

fn pricing() -> SlideDefinition {
    SlideDefinition::new(
        "Pricing Information",
        Icon::Settings,
        vec![
            Card::new("Dynamic Pricing")
                .icon(Icon::Settings)
                .tone(Tone::Accent)
                .body(vec![
                    Block::heading("🏷️ Pricing Features"),
                    Block::labeled(
                        BadgeVariant::Secondary,
                        [
                            ("Base", "Regular pricing"),
                            ("Sale", "Promotional pricing"),
                            ("Currency", "Multi-currency support"),
                            ("Tax", "Tax information"),
                        ],
                    ),
                    Block::heading("⚡ Dynamic Updates"),
                    Block::text("Pricing automatically updates when store runs promotions"),
                    Block::code(
                        r#"site {
  product(entityId: 123) {
    name
    prices {
      price { value currencyCode }
      salePrice { value currencyCode }
      tax { value currencyCode }
    }
  }
}"#,
                    ),
                ])
                .into(),
        ],
    )
}

fn cart_management() -> SlideDefinition {
    SlideDefinition::new(
        "Cart Management",
        Icon::ShoppingCart,
        vec![
            Card::new("Cart API Operations")
                .icon(Icon::ShoppingCart)
                .tone(Tone::Primary)
                .body(vec![
                    Block::heading("🎯 Purpose & Features"),
                    Block::bullets([
                        "Maintains shopper's state across devices and sessions",
                        "Server-side cart entity for reliability",
                        "Real-time inventory validation",
                    ]),
                    Block::heading("🔧 Operations"),
                    Block::badges(
                        BadgeVariant::Outline,
                        ["createCart", "addCartLineItems", "deleteCart", "update quantities"],
                    ),
                    Block::heading("🔑 Key Elements"),
                    Block::badges(BadgeVariant::Secondary, ["cartEntityId", "storefront tokens", "customer tokens"]),
                    Block::code(
                        r#"mutation addCartLineItems($addCartLineItemsInput: AddCartLineItemsInput!) {
  cart {
    addCartLineItems(input: $addCartLineItemsInput) {
      cart {
        entityId
        lineItems {
          physicalItems {
            name
            quantity
            sku
          }
        }
      }
      errors {
        ... on Error { message }
      }
    }
  }
}"#,
                    ),
                ])
                .into(),
        ],
    )
}

fn checkout() -> SlideDefinition {
    SlideDefinition::new(
        "Checkout API Basics",
        Icon::Zap,
        vec![
            Card::new("Checkout Flow")
                .icon(Icon::Zap)
                .tone(Tone::Accent)
                .body(vec![
                    Block::heading("🔄 Complete Flow"),
                    Block::steps([
                        "Create Cart",
                        "Fill Shipping & Billing",
                        "Select Shipping Option",
                        "Complete Checkout",
                    ]),
                    Block::heading("📤 Returns"),
                    Block::bullets(["orderEntityId", "paymentAccessToken"]),
                    Block::heading("💳 Payment Note"),
                    Block::text(
                        "Payments handled by separate Payments API (GraphQL doesn't handle PCI operations)",
                    ),
                    Block::code(
                        r#"mutation completeCheckout($completeCheckoutInput: CompleteCheckoutInput!) {
  checkout {
    completeCheckout(input: $completeCheckoutInput) {
      orderEntityId
      paymentAccessToken
    }
  }
}"#,
                    ),
                ])
                .into(),
        ],
    )
}

fn queries_and_mutations() -> SlideDefinition {
    SlideDefinition::new(
        "Using GraphQL Queries & Mutations",
        Icon::Code,
        vec![
            Card::new("Best Practices")
                .icon(Icon::Code)
                .tone(Tone::Primary)
                .body(vec![
                    Block::heading("🔧 Request Format"),
                    Block::bullets([
                        "POST to /graphql endpoint",
                        "JSON payload: { query, variables }",
                        "Bearer token authentication",
                    ]),
                    Block::heading("⚡ Optimization"),
                    Block::bullets([
                        "Use variables for dynamic data",
                        "Implement fragments for reusability",
                        "Select only needed fields",
                    ]),
                    Block::heading("🔐 Authentication"),
                    Block::badges(BadgeVariant::Outline, ["Storefront API token (Bearer)", "Optional customer token"]),
                    Block::code(
                        r#"const query = `mutation addCart($input: AddCartLineItemsInput!) {
  cart {
    addCartLineItems(input: $input) {
      cart { entityId }
      errors {
        ... on Error { message }
      }
    }
  }
}`;

// Send with variables and authentication
fetch('/graphql', {
  method: 'POST',
  headers: {
    'Authorization': 'Bearer YOUR_TOKEN',
    'Content-Type': 'application/json'
  },
  body: JSON.stringify({ query, variables: input })
})"#,
                    ),
                ])
                .into(),
        ],
    )
}

fn error_handling() -> SlideDefinition {
    SlideDefinition::new(
        "Error Handling & UX",
        Icon::Settings,
        vec![
            Card::new("Error Handling")
                .icon(Icon::Settings)
                .tone(Tone::Destructive)
                .body(vec![
                    Block::heading("⚠️ Key Points"),
                    Block::bullets([
                        "GraphQL can return partial data + errors",
                        "Handle network/HTTP errors separately",
                        "Show user-friendly error messages",
                        "Log GraphQL errors server-side",
                    ]),
                    Block::heading("🔧 Error Types"),
                    Block::badges(BadgeVariant::Destructive, ["Out of stock", "Invalid selections", "Network issues"]),
                ])
                .into(),
            Card::new("Loading & UX")
                .icon(Icon::Zap)
                .tone(Tone::Accent)
                .body(vec![
                    Block::heading("✨ UX Best Practices"),
                    Block::bullets([
                        "Use skeleton loaders for heavy views",
                        "Optimistic UI for cart actions",
                        "Clear states: loading, success, error, empty",
                        "Rollback on failure",
                    ]),
                    Block::heading("🎯 User States"),
                    Block::badges(BadgeVariant::Secondary, ["Loading", "Success", "Error", "Empty"]),
                ])
                .into(),
            Card::new("💻 Implementation Example")
                .body(vec![Block::code(
                    r#"const { data, errors } = await fetchGraphQL(query, vars);

if (errors && errors.length) {
  console.error('GraphQL errors', errors);
  showBanner('Something went wrong updating your cart. Please retry.');
}

if (data) {
  // Use data successfully
  updateUI(data);
}"#,
                )])
                .into(),
        ],
    )
}
