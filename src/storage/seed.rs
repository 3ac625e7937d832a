use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::catalog::repo_types::{Category, Product, Service, Testimonial};

/// Reference data loaded at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub services: Vec<Service>,
    pub testimonials: Vec<Testimonial>,
}

impl Seed {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read seed file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parse seed file {}", path.display()))
    }
}

/// Small catalog shared by the unit tests.
///
/// `cat-psu` deliberately has no products.
#[cfg(test)]
pub(crate) fn fixture() -> Seed {
    serde_json::from_value(serde_json::json!({
        "categories": [
            { "id": "cat-cpu", "name": "CPUs & Processors", "slug": "cpus-processors" },
            { "id": "cat-ram", "name": "RAM & Memory", "slug": "ram-memory" },
            { "id": "cat-ssd", "name": "Storage & SSDs", "slug": "storage-ssds" },
            { "id": "cat-gpu", "name": "Graphics Cards", "slug": "graphics-cards" },
            { "id": "cat-psu", "name": "Power Supplies", "slug": "power-supplies" }
        ],
        "products": [
            {
                "id": "prod-i7", "name": "Intel Core i7-13700K Processor",
                "slug": "intel-core-i7-13700k",
                "description": "16 cores, 24 threads. Perfect for gaming and professional workloads.",
                "price": "35999.00", "originalPrice": "42499.00", "image": "i7.jpg",
                "categoryId": "cat-cpu", "featured": true,
                "specifications": { "cores": 16, "socket": "LGA1700" },
                "rating": "4.8", "reviewCount": 127
            },
            {
                "id": "prod-ram", "name": "Corsair Vengeance RGB Pro 32GB DDR4",
                "slug": "corsair-vengeance-rgb-pro-32gb",
                "description": "3200MHz, CL16, RGB lighting.",
                "price": "12999.00", "image": "ram.jpg",
                "categoryId": "cat-ram", "featured": true,
                "rating": "4.9", "reviewCount": 89
            },
            {
                "id": "prod-ssd", "name": "Samsung 980 PRO 1TB NVMe SSD",
                "slug": "samsung-980-pro-1tb",
                "description": "PCIe 4.0, 7000MB/s read. Lightning-fast storage.",
                "price": "8999.00", "originalPrice": "11499.00", "image": "ssd.jpg",
                "categoryId": "cat-ssd", "featured": true,
                "rating": "4.9", "reviewCount": 203
            },
            {
                "id": "prod-gpu", "name": "NVIDIA RTX 4070 Ti Graphics Card",
                "slug": "nvidia-rtx-4070-ti",
                "description": "12GB GDDR6X, Ray Tracing, DLSS 3.",
                "price": "62999.00", "image": "gpu.jpg",
                "categoryId": "cat-gpu", "featured": false,
                "rating": "4.7", "reviewCount": 156
            },
            {
                "id": "prod-ryzen", "name": "AMD Ryzen 7 7700X Processor",
                "slug": "amd-ryzen-7-7700x",
                "description": "8 cores, 16 threads. Exceptional for content creation.",
                "price": "28999.00", "image": "ryzen.jpg",
                "categoryId": "cat-cpu",
                "rating": "4.6", "reviewCount": 98
            }
        ],
        "services": [
            {
                "id": "srv-server", "name": "Server Setup & Configuration",
                "slug": "server-setup-configuration",
                "description": "Professional server installation and optimization.",
                "price": "15000.00", "icon": "server", "category": "infrastructure",
                "features": ["Windows & Linux Server Setup", "Database Configuration"]
            },
            {
                "id": "srv-network", "name": "Network Installation & Maintenance",
                "slug": "network-installation-maintenance",
                "description": "Complete networking solutions.",
                "price": "8000.00", "icon": "network-wired", "category": "infrastructure"
            },
            {
                "id": "srv-repair", "name": "Computer & Laptop Repair",
                "slug": "computer-laptop-repair",
                "description": "Expert repair services.",
                "price": "500.00", "icon": "tools", "category": "support"
            },
            {
                "id": "srv-aws", "name": "AWS Cloud Migration",
                "slug": "aws-cloud-migration",
                "description": "AWS migration with certified architects.",
                "price": "25000.00", "icon": "cloud", "category": "cloud"
            }
        ],
        "testimonials": [
            {
                "id": "test-1", "name": "Rajesh Kumar", "title": "CTO",
                "company": "TechCorp India", "content": "Seamless migration."
            },
            {
                "id": "test-2", "name": "Priya Sharma", "title": "Software Developer",
                "content": "Fast delivery and genuine products.", "rating": 4
            }
        ]
    }))
    .expect("fixture seed is valid")
}
