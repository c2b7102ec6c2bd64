//! Built-in menu, served when the remote `menu` table is empty

use rust_decimal::Decimal;

use crate::models::MenuItem;

struct Entry {
    name: &'static str,
    description: &'static str,
    /// In paise
    price: i64,
    category: &'static str,
    image: &'static str,
    veg: bool,
    spicy: bool,
}

const FALLBACK: &[Entry] = &[
    Entry {
        name: "Masala Chai",
        description: "Spiced tea brewed with milk, ginger and cardamom",
        price: 4900,
        category: "Beverages",
        image: "/assets/masala-chai.jpg",
        veg: true,
        spicy: false,
    },
    Entry {
        name: "Cappuccino",
        description: "Double shot espresso with steamed milk foam",
        price: 14900,
        category: "Beverages",
        image: "/assets/cappuccino.jpg",
        veg: true,
        spicy: false,
    },
    Entry {
        name: "Cold Coffee",
        description: "Chilled coffee blended with ice cream",
        price: 12900,
        category: "Beverages",
        image: "",
        veg: true,
        spicy: false,
    },
    Entry {
        name: "Samosa (2 pcs)",
        description: "Crisp pastry filled with spiced potatoes and peas",
        price: 5900,
        category: "Snacks",
        image: "/assets/samosa.jpg",
        veg: true,
        spicy: true,
    },
    Entry {
        name: "Chicken Samosa",
        description: "Pastry stuffed with minced chicken and onions",
        price: 7900,
        category: "Snacks",
        image: "",
        veg: false,
        spicy: true,
    },
    Entry {
        name: "Vada Pav",
        description: "Mumbai street burger with garlic chutney",
        price: 4900,
        category: "Snacks",
        image: "",
        veg: true,
        spicy: true,
    },
    Entry {
        name: "Masala Dosa",
        description: "Rice crepe with potato masala, sambar and chutney",
        price: 12900,
        category: "South Indian",
        image: "/assets/masala-dosa.jpg",
        veg: true,
        spicy: false,
    },
    Entry {
        name: "Idli Sambar",
        description: "Steamed rice cakes with lentil stew",
        price: 8900,
        category: "South Indian",
        image: "",
        veg: true,
        spicy: false,
    },
    Entry {
        name: "Paneer Butter Masala",
        description: "Cottage cheese in a rich tomato and butter gravy",
        price: 24900,
        category: "Main Course",
        image: "/assets/paneer-butter-masala.jpg",
        veg: true,
        spicy: false,
    },
    Entry {
        name: "Chicken Biryani",
        description: "Fragrant basmati rice layered with spiced chicken",
        price: 29900,
        category: "Main Course",
        image: "/assets/biryani.jpg",
        veg: false,
        spicy: true,
    },
    Entry {
        name: "Dal Makhani",
        description: "Slow-cooked black lentils finished with cream",
        price: 19900,
        category: "Main Course",
        image: "",
        veg: true,
        spicy: false,
    },
    Entry {
        name: "Gulab Jamun",
        description: "Milk dumplings soaked in rose cardamom syrup",
        price: 6900,
        category: "Desserts",
        image: "/assets/gulab-jamun.jpg",
        veg: true,
        spicy: false,
    },
];

/// The built-in item list, ids `fallback-1`..
pub fn fallback_menu() -> Vec<MenuItem> {
    FALLBACK
        .iter()
        .enumerate()
        .map(|(i, e)| MenuItem {
            id: format!("fallback-{}", i + 1),
            name: e.name.to_string(),
            description: e.description.to_string(),
            price: Decimal::new(e.price, 2),
            category: e.category.to_string(),
            image_url: e.image.to_string(),
            is_veg: e.veg,
            is_spicy: e.spicy,
        })
        .collect()
}
