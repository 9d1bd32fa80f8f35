use crate::models::{Badge, Product, ProductCategory, ProductId};

struct SeedProduct {
    id: u32,
    name: &'static str,
    category: ProductCategory,
    price: f64,
    original_price: Option<f64>,
    rating: f64,
    review_count: u32,
    color: &'static str,
    label: &'static str,
    description: &'static str,
    badge: Option<Badge>,
}

const SEED: [SeedProduct; 12] = [
    SeedProduct {
        id: 1,
        name: "Wireless Bluetooth Headphones",
        category: ProductCategory::Electronics,
        price: 89.99,
        original_price: Some(129.99),
        rating: 4.5,
        review_count: 1247,
        color: "3b82f6",
        label: "Headphones",
        description: "High-quality wireless headphones with noise cancellation and 30-hour battery life.",
        badge: Some(Badge::Sale),
    },
    SeedProduct {
        id: 2,
        name: "Smart Fitness Watch",
        category: ProductCategory::Electronics,
        price: 199.99,
        original_price: None,
        rating: 4.8,
        review_count: 892,
        color: "10b981",
        label: "Smart+Watch",
        description: "Advanced fitness tracking with heart rate monitor and GPS capabilities.",
        badge: Some(Badge::New),
    },
    SeedProduct {
        id: 3,
        name: "Organic Cotton T-Shirt",
        category: ProductCategory::Clothing,
        price: 24.99,
        original_price: Some(34.99),
        rating: 4.2,
        review_count: 456,
        color: "f59e0b",
        label: "T-Shirt",
        description: "Comfortable organic cotton t-shirt available in multiple colors.",
        badge: Some(Badge::Sale),
    },
    SeedProduct {
        id: 4,
        name: "Yoga Mat Premium",
        category: ProductCategory::Sports,
        price: 49.99,
        original_price: None,
        rating: 4.6,
        review_count: 234,
        color: "8b5cf6",
        label: "Yoga+Mat",
        description: "Non-slip yoga mat with carrying strap and alignment lines.",
        badge: None,
    },
    SeedProduct {
        id: 5,
        name: "Coffee Maker Deluxe",
        category: ProductCategory::Home,
        price: 149.99,
        original_price: Some(199.99),
        rating: 4.4,
        review_count: 678,
        color: "ef4444",
        label: "Coffee+Maker",
        description: "Programmable coffee maker with thermal carafe and built-in grinder.",
        badge: Some(Badge::Sale),
    },
    SeedProduct {
        id: 6,
        name: "Wireless Gaming Mouse",
        category: ProductCategory::Electronics,
        price: 79.99,
        original_price: None,
        rating: 4.7,
        review_count: 345,
        color: "06b6d4",
        label: "Gaming+Mouse",
        description: "High-precision wireless gaming mouse with customizable RGB lighting.",
        badge: None,
    },
    SeedProduct {
        id: 7,
        name: "Running Shoes Pro",
        category: ProductCategory::Sports,
        price: 129.99,
        original_price: Some(159.99),
        rating: 4.3,
        review_count: 567,
        color: "84cc16",
        label: "Running+Shoes",
        description: "Lightweight running shoes with superior cushioning and breathability.",
        badge: Some(Badge::Sale),
    },
    SeedProduct {
        id: 8,
        name: "Skincare Set Complete",
        category: ProductCategory::Beauty,
        price: 89.99,
        original_price: Some(119.99),
        rating: 4.6,
        review_count: 234,
        color: "ec4899",
        label: "Skincare+Set",
        description: "Complete skincare routine with cleanser, toner, and moisturizer.",
        badge: Some(Badge::Sale),
    },
    SeedProduct {
        id: 9,
        name: "Wireless Earbuds",
        category: ProductCategory::Electronics,
        price: 159.99,
        original_price: None,
        rating: 4.9,
        review_count: 1234,
        color: "6366f1",
        label: "Wireless+Earbuds",
        description: "True wireless earbuds with active noise cancellation and wireless charging.",
        badge: Some(Badge::New),
    },
    SeedProduct {
        id: 10,
        name: "Denim Jacket Classic",
        category: ProductCategory::Clothing,
        price: 89.99,
        original_price: None,
        rating: 4.1,
        review_count: 189,
        color: "78716c",
        label: "Denim+Jacket",
        description: "Classic denim jacket with comfortable fit and durable construction.",
        badge: None,
    },
    SeedProduct {
        id: 11,
        name: "Garden Tool Set",
        category: ProductCategory::Home,
        price: 69.99,
        original_price: Some(89.99),
        rating: 4.5,
        review_count: 156,
        color: "16a34a",
        label: "Garden+Tools",
        description: "Complete garden tool set with ergonomic handles and rust-resistant coating.",
        badge: Some(Badge::Sale),
    },
    SeedProduct {
        id: 12,
        name: "Programming Book Bundle",
        category: ProductCategory::Books,
        price: 49.99,
        original_price: Some(79.99),
        rating: 4.8,
        review_count: 89,
        color: "ea580c",
        label: "Programming+Books",
        description: "Bundle of 3 programming books covering JavaScript, Python, and React.",
        badge: Some(Badge::Sale),
    },
];

/// The fixed catalog every session starts from, in display order.
pub fn seed_products() -> Vec<Product> {
    SEED.iter()
        .map(|seed| Product {
            id: ProductId(seed.id),
            name: seed.name.to_string(),
            category: seed.category,
            price: seed.price,
            original_price: seed.original_price,
            rating: seed.rating,
            review_count: seed.review_count,
            in_stock: true,
            badge: seed.badge,
            description: seed.description.to_string(),
            image_url: format!(
                "https://via.placeholder.com/300x300/{}/ffffff?text={}",
                seed.color, seed.label
            ),
        })
        .collect()
}
