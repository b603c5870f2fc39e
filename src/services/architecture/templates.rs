//! Architecture Template Tables
//!
//! Static per-category data: pages, base components, data entities and the
//! technology bundle, plus the feature-trigger table that appends extra
//! components. Kept as data so the tables can be tested and swapped
//! independently of the synthesizer.

use crate::models::DomainCategory;

pub struct PageTemplate {
    pub name: &'static str,
    pub route: &'static str,
    pub purpose: &'static str,
}

pub struct ComponentTemplate {
    pub name: &'static str,
    pub purpose: &'static str,
}

pub struct EntityTemplate {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

pub struct CategoryTemplate {
    pub category: DomainCategory,
    pub pages: &'static [PageTemplate],
    pub components: &'static [ComponentTemplate],
    pub entities: &'static [EntityTemplate],
    pub frontend: &'static [&'static str],
    pub backend: &'static [&'static str],
    pub database: &'static [&'static str],
    pub integrations: &'static [&'static str],
}

/// Appends `component` when a feature name has a word starting with `trigger`.
pub struct ComponentTrigger {
    pub trigger: &'static str,
    pub component: ComponentTemplate,
}

macro_rules! page {
    ($name:expr, $route:expr, $purpose:expr) => {
        PageTemplate {
            name: $name,
            route: $route,
            purpose: $purpose,
        }
    };
}

macro_rules! component {
    ($name:expr, $purpose:expr) => {
        ComponentTemplate {
            name: $name,
            purpose: $purpose,
        }
    };
}

macro_rules! entity {
    ($name:expr, [$($field:expr),* $(,)?]) => {
        EntityTemplate {
            name: $name,
            fields: &[$($field),*],
        }
    };
}

// ============================================================================
// Category Templates
// ============================================================================

static SAAS: CategoryTemplate = CategoryTemplate {
    category: DomainCategory::Saas,
    pages: &[
        page!("Home", "/", "Value proposition and sign-up call to action"),
        page!("Dashboard", "/dashboard", "Key metrics and recent activity at a glance"),
        page!("Reports", "/reports", "Filterable charts and exports"),
        page!("Pricing", "/pricing", "Plan comparison and upgrade path"),
        page!("Settings", "/settings", "Workspace, team and billing settings"),
    ],
    components: &[
        component!("Navigation Bar", "Top-level navigation and account menu"),
        component!("Metric Card", "Single KPI with trend indicator"),
        component!("Data Table", "Sortable, paginated records"),
        component!("Plan Selector", "Subscription tier picker"),
    ],
    entities: &[
        entity!("Workspace", ["id", "name", "plan", "created_at"]),
        entity!("User", ["id", "workspace_id", "email", "role"]),
        entity!("Subscription", ["id", "workspace_id", "tier", "status", "renews_at"]),
        entity!("Metric", ["id", "workspace_id", "name", "value", "recorded_at"]),
    ],
    frontend: &["React", "TypeScript", "Tailwind CSS"],
    backend: &["Node.js", "Express", "REST API"],
    database: &["PostgreSQL", "Redis"],
    integrations: &["Stripe Billing subscriptions", "SendGrid email", "Auth0 authentication"],
};

static MARKETPLACE: CategoryTemplate = CategoryTemplate {
    category: DomainCategory::Marketplace,
    pages: &[
        page!("Home", "/", "Marketplace pitch and featured listings"),
        page!("Listings", "/listings", "Browse and filter everything on offer"),
        page!("Listing Detail", "/listings/:id", "Full description, seller info and order button"),
        page!("Orders", "/orders", "Order history and status for buyers and sellers"),
        page!("Seller Dashboard", "/seller", "Manage listings, orders and payouts"),
        page!("Checkout", "/checkout", "Confirm order and pay"),
    ],
    components: &[
        component!("Navigation Bar", "Top-level navigation and account menu"),
        component!("Listing Card", "Summary of one listing with price and seller"),
        component!("Search Filters", "Category, price and location filters"),
        component!("Ordering Panel", "Quantity, delivery options and order submission"),
        component!("Seller Badge", "Seller identity and rating"),
    ],
    entities: &[
        entity!("User", ["id", "email", "role", "created_at"]),
        entity!("Seller", ["id", "user_id", "display_name", "payout_account"]),
        entity!("Listing", ["id", "seller_id", "title", "price", "quantity", "status"]),
        entity!("Order", ["id", "listing_id", "buyer_id", "quantity", "total", "status"]),
        entity!("Payment", ["id", "order_id", "amount", "fee", "status"]),
    ],
    frontend: &["React", "TypeScript", "Tailwind CSS"],
    backend: &["Node.js", "Express", "REST API"],
    database: &["PostgreSQL", "Elasticsearch"],
    integrations: &["Stripe Connect payments and payouts", "Mapbox location search", "Twilio SMS"],
};

static STOREFRONT: CategoryTemplate = CategoryTemplate {
    category: DomainCategory::Storefront,
    pages: &[
        page!("Home", "/", "Brand story and featured products"),
        page!("Catalog", "/products", "Browse products by collection"),
        page!("Product Detail", "/products/:id", "Photos, description, price and add to cart"),
        page!("Cart", "/cart", "Review items before checkout"),
        page!("Checkout", "/checkout", "Shipping details and payment"),
    ],
    components: &[
        component!("Navigation Bar", "Top-level navigation and cart indicator"),
        component!("Product Card", "Product image, name and price"),
        component!("Cart Drawer", "Slide-out cart summary"),
        component!("Checkout Form", "Address and payment entry"),
    ],
    entities: &[
        entity!("Product", ["id", "name", "price", "stock", "collection"]),
        entity!("Customer", ["id", "email", "name", "address"]),
        entity!("Cart", ["id", "customer_id", "items", "updated_at"]),
        entity!("Order", ["id", "customer_id", "total", "status", "placed_at"]),
    ],
    frontend: &["Next.js", "TypeScript", "Tailwind CSS"],
    backend: &["Node.js", "REST API"],
    database: &["PostgreSQL"],
    integrations: &["Stripe Checkout payments", "Shippo shipping rates", "Mailchimp email"],
};

static TASK_MANAGER: CategoryTemplate = CategoryTemplate {
    category: DomainCategory::TaskManager,
    pages: &[
        page!("Home", "/", "What the tool does and sign-up"),
        page!("Board", "/board", "Kanban columns of tasks"),
        page!("Task Detail", "/tasks/:id", "Description, assignee, due date and comments"),
        page!("Calendar", "/calendar", "Tasks by due date"),
        page!("Team", "/team", "Members and workload"),
    ],
    components: &[
        component!("Navigation Bar", "Top-level navigation and project switcher"),
        component!("Task Card", "Title, assignee avatar and due date"),
        component!("Kanban Column", "Drag-and-drop task list by status"),
        component!("Quick Add", "Inline task creation"),
    ],
    entities: &[
        entity!("Project", ["id", "name", "owner_id"]),
        entity!("Task", ["id", "project_id", "title", "status", "assignee_id", "due_at"]),
        entity!("Comment", ["id", "task_id", "author_id", "body"]),
        entity!("Member", ["id", "email", "name"]),
    ],
    frontend: &["React", "TypeScript", "CSS Modules"],
    backend: &["Node.js", "GraphQL API"],
    database: &["PostgreSQL"],
    integrations: &["Google Calendar sync", "Slack notifications"],
};

static COMMUNITY: CategoryTemplate = CategoryTemplate {
    category: DomainCategory::Community,
    pages: &[
        page!("Home", "/", "Community pitch and trending discussions"),
        page!("Feed", "/feed", "Latest posts from followed topics"),
        page!("Groups", "/groups", "Browse and join groups"),
        page!("Events", "/events", "Upcoming meetups and sessions"),
        page!("Profile", "/members/:id", "Member bio and activity"),
    ],
    components: &[
        component!("Navigation Bar", "Top-level navigation and notifications"),
        component!("Post Card", "Post with author, reactions and replies"),
        component!("Composer", "Create a post or reply"),
        component!("Member Avatar", "Avatar with presence indicator"),
    ],
    entities: &[
        entity!("Member", ["id", "handle", "email", "bio"]),
        entity!("Group", ["id", "name", "description", "visibility"]),
        entity!("Post", ["id", "group_id", "author_id", "body", "created_at"]),
        entity!("Event", ["id", "group_id", "title", "starts_at", "location"]),
    ],
    frontend: &["React", "TypeScript", "Tailwind CSS"],
    backend: &["Node.js", "WebSocket server", "REST API"],
    database: &["PostgreSQL", "Redis"],
    integrations: &["Cloudinary media hosting", "SendGrid email digests"],
};

static GENERIC: CategoryTemplate = CategoryTemplate {
    category: DomainCategory::Generic,
    pages: &[
        page!("Home", "/", "What the product does and who it is for"),
        page!("Features", "/features", "Capabilities in detail"),
        page!("About", "/about", "Team and mission"),
        page!("Contact", "/contact", "Get in touch"),
    ],
    components: &[
        component!("Navigation Bar", "Top-level navigation"),
        component!("Hero Section", "Headline and primary call to action"),
        component!("Feature Grid", "Cards describing each capability"),
        component!("Footer", "Secondary links and legal"),
    ],
    entities: &[
        entity!("User", ["id", "email", "name", "created_at"]),
        entity!("Inquiry", ["id", "email", "message", "received_at"]),
    ],
    frontend: &["HTML", "CSS", "JavaScript"],
    backend: &["Node.js", "REST API"],
    database: &["SQLite"],
    integrations: &["Plausible analytics"],
};

/// Every category template; `Generic` is last.
pub static TEMPLATES: [&CategoryTemplate; 6] =
    [&SAAS, &MARKETPLACE, &STOREFRONT, &TASK_MANAGER, &COMMUNITY, &GENERIC];

/// Template for a category, defaulting to the generic bundle.
pub fn template_for(category: DomainCategory) -> &'static CategoryTemplate {
    TEMPLATES
        .iter()
        .copied()
        .find(|t| t.category == category)
        .unwrap_or(&GENERIC)
}

// ============================================================================
// Feature Triggers
// ============================================================================

/// Feature-name triggers, applied in table order.
pub static COMPONENT_TRIGGERS: &[ComponentTrigger] = &[
    ComponentTrigger {
        trigger: "form",
        component: component!("Form", "Validated input form"),
    },
    ComponentTrigger {
        trigger: "search",
        component: component!("Search Bar", "Free-text search with suggestions"),
    },
    ComponentTrigger {
        trigger: "order",
        component: component!("Order Summary", "Line items, totals and status"),
    },
    ComponentTrigger {
        trigger: "payment",
        component: component!("Payment Form", "Card entry and payment confirmation"),
    },
    ComponentTrigger {
        trigger: "checkout",
        component: component!("Payment Form", "Card entry and payment confirmation"),
    },
    ComponentTrigger {
        trigger: "analytic",
        component: component!("Chart Panel", "Time-series and breakdown charts"),
    },
    ComponentTrigger {
        trigger: "report",
        component: component!("Chart Panel", "Time-series and breakdown charts"),
    },
    ComponentTrigger {
        trigger: "notif",
        component: component!("Notification Center", "In-app alerts and read state"),
    },
    ComponentTrigger {
        trigger: "messag",
        component: component!("Messaging Panel", "Threaded conversations"),
    },
    ComponentTrigger {
        trigger: "chat",
        component: component!("Messaging Panel", "Threaded conversations"),
    },
    ComponentTrigger {
        trigger: "map",
        component: component!("Map View", "Locations on an interactive map"),
    },
    ComponentTrigger {
        trigger: "location",
        component: component!("Map View", "Locations on an interactive map"),
    },
    ComponentTrigger {
        trigger: "calendar",
        component: component!("Calendar Widget", "Month and week views of dated items"),
    },
    ComponentTrigger {
        trigger: "schedul",
        component: component!("Calendar Widget", "Month and week views of dated items"),
    },
    ComponentTrigger {
        trigger: "upload",
        component: component!("Media Uploader", "Drag-and-drop file and image upload"),
    },
    ComponentTrigger {
        trigger: "review",
        component: component!("Rating Widget", "Star rating with written review"),
    },
    ComponentTrigger {
        trigger: "rating",
        component: component!("Rating Widget", "Star rating with written review"),
    },
    ComponentTrigger {
        trigger: "login",
        component: component!("Auth Form", "Sign-in and sign-up"),
    },
    ComponentTrigger {
        trigger: "account",
        component: component!("Auth Form", "Sign-in and sign-up"),
    },
];
