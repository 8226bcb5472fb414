//! The fixed catalog the shop ships with.

use infra::ids::Id;

use super::models::{CatalogItem, Category, CategoryInfo};
use crate::money::Price;

pub(super) const CATEGORIES: [CategoryInfo; 5] = [
    CategoryInfo {
        id: Category::Pizza,
        name: "Pizza",
        icon: "🍕",
        description: "Cheesy goodness",
    },
    CategoryInfo {
        id: Category::Burgers,
        name: "Burgers",
        icon: "🍔",
        description: "Juicy patties",
    },
    CategoryInfo {
        id: Category::Desserts,
        name: "Desserts",
        icon: "🍰",
        description: "Sweet treats",
    },
    CategoryInfo {
        id: Category::Drinks,
        name: "Drinks",
        icon: "🥤",
        description: "Refresh yourself",
    },
    CategoryInfo {
        id: Category::Healthy,
        name: "Healthy",
        icon: "🥗",
        description: "Feel good food",
    },
];

struct Entry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cents: u64,
    image: &'static str,
    category: Category,
    rating: f32,
    review_count: u32,
    is_veg: bool,
    is_hot: bool,
    is_bestseller: bool,
    ingredients: &'static [&'static str],
    calories: u32,
    prep_time: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "pizza-1",
        name: "Margherita Classic",
        description: "Fresh tomatoes, mozzarella, basil, and our signature sauce on a hand-tossed crust",
        cents: 1299,
        image: "food/pizza-margherita.jpg",
        category: Category::Pizza,
        rating: 4.8,
        review_count: 234,
        is_veg: true,
        is_hot: false,
        is_bestseller: true,
        ingredients: &["Tomatoes", "Mozzarella", "Basil", "Olive Oil"],
        calories: 850,
        prep_time: "20-25 min",
    },
    Entry {
        id: "pizza-2",
        name: "Pepperoni Feast",
        description: "Loaded with double pepperoni, extra cheese, and Italian herbs",
        cents: 1599,
        image: "food/pizza-pepperoni.jpg",
        category: Category::Pizza,
        rating: 4.9,
        review_count: 456,
        is_veg: false,
        is_hot: true,
        is_bestseller: true,
        ingredients: &["Pepperoni", "Mozzarella", "Tomato Sauce", "Oregano"],
        calories: 1100,
        prep_time: "20-25 min",
    },
    Entry {
        id: "pizza-3",
        name: "BBQ Chicken Supreme",
        description: "Grilled chicken, BBQ sauce, red onions, and bell peppers",
        cents: 1799,
        image: "food/pizza-bbq.jpg",
        category: Category::Pizza,
        rating: 4.7,
        review_count: 189,
        is_veg: false,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Chicken", "BBQ Sauce", "Red Onions", "Bell Peppers"],
        calories: 980,
        prep_time: "25-30 min",
    },
    Entry {
        id: "burger-1",
        name: "Classic Smash Burger",
        description: "Double smashed patties, American cheese, pickles, onions, and special sauce",
        cents: 1199,
        image: "food/burger-classic.jpg",
        category: Category::Burgers,
        rating: 4.9,
        review_count: 567,
        is_veg: false,
        is_hot: false,
        is_bestseller: true,
        ingredients: &["Beef Patties", "American Cheese", "Pickles", "Special Sauce"],
        calories: 750,
        prep_time: "15-20 min",
    },
    Entry {
        id: "burger-2",
        name: "Spicy Jalapeño",
        description: "Fiery jalapeños, pepper jack cheese, crispy onions, and chipotle mayo",
        cents: 1399,
        image: "food/burger-jalapeno.jpg",
        category: Category::Burgers,
        rating: 4.6,
        review_count: 234,
        is_veg: false,
        is_hot: true,
        is_bestseller: false,
        ingredients: &["Beef Patty", "Jalapeños", "Pepper Jack", "Chipotle Mayo"],
        calories: 820,
        prep_time: "15-20 min",
    },
    Entry {
        id: "burger-3",
        name: "Veggie Delight",
        description: "Plant-based patty, avocado, tomato, lettuce, and vegan aioli",
        cents: 1299,
        image: "food/burger-veggie.jpg",
        category: Category::Burgers,
        rating: 4.5,
        review_count: 156,
        is_veg: true,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Plant Patty", "Avocado", "Tomato", "Vegan Aioli"],
        calories: 580,
        prep_time: "15-20 min",
    },
    Entry {
        id: "dessert-1",
        name: "Chocolate Lava Cake",
        description: "Warm chocolate cake with a molten center, served with vanilla ice cream",
        cents: 899,
        image: "food/dessert-lava-cake.jpg",
        category: Category::Desserts,
        rating: 4.9,
        review_count: 345,
        is_veg: true,
        is_hot: false,
        is_bestseller: true,
        ingredients: &["Dark Chocolate", "Butter", "Eggs", "Vanilla Ice Cream"],
        calories: 650,
        prep_time: "10-15 min",
    },
    Entry {
        id: "dessert-2",
        name: "New York Cheesecake",
        description: "Creamy classic cheesecake with strawberry compote",
        cents: 799,
        image: "food/dessert-cheesecake.jpg",
        category: Category::Desserts,
        rating: 4.7,
        review_count: 234,
        is_veg: true,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Cream Cheese", "Graham Crust", "Strawberries"],
        calories: 480,
        prep_time: "5 min",
    },
    Entry {
        id: "dessert-3",
        name: "Tiramisu",
        description: "Layers of espresso-soaked ladyfingers and mascarpone cream",
        cents: 999,
        image: "food/dessert-tiramisu.jpg",
        category: Category::Desserts,
        rating: 4.8,
        review_count: 189,
        is_veg: true,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Mascarpone", "Espresso", "Ladyfingers", "Cocoa"],
        calories: 420,
        prep_time: "5 min",
    },
    Entry {
        id: "drink-1",
        name: "Mango Tango Smoothie",
        description: "Fresh mango, banana, coconut milk, and a hint of lime",
        cents: 599,
        image: "food/drink-mango.jpg",
        category: Category::Drinks,
        rating: 4.8,
        review_count: 289,
        is_veg: true,
        is_hot: false,
        is_bestseller: true,
        ingredients: &["Mango", "Banana", "Coconut Milk", "Lime"],
        calories: 220,
        prep_time: "5 min",
    },
    Entry {
        id: "drink-2",
        name: "Strawberry Lemonade",
        description: "Fresh-squeezed lemonade with muddled strawberries",
        cents: 499,
        image: "food/drink-lemonade.jpg",
        category: Category::Drinks,
        rating: 4.6,
        review_count: 178,
        is_veg: true,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Strawberries", "Lemon", "Sugar", "Mint"],
        calories: 150,
        prep_time: "5 min",
    },
    Entry {
        id: "drink-3",
        name: "Iced Caramel Latte",
        description: "Espresso, milk, caramel, over ice",
        cents: 549,
        image: "food/drink-latte.jpg",
        category: Category::Drinks,
        rating: 4.7,
        review_count: 345,
        is_veg: true,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Espresso", "Milk", "Caramel Syrup", "Ice"],
        calories: 180,
        prep_time: "5 min",
    },
    Entry {
        id: "healthy-1",
        name: "Buddha Bowl",
        description: "Quinoa, roasted chickpeas, avocado, kale, and tahini dressing",
        cents: 1399,
        image: "food/healthy-buddha.jpg",
        category: Category::Healthy,
        rating: 4.7,
        review_count: 234,
        is_veg: true,
        is_hot: false,
        is_bestseller: true,
        ingredients: &["Quinoa", "Chickpeas", "Avocado", "Kale", "Tahini"],
        calories: 520,
        prep_time: "15-20 min",
    },
    Entry {
        id: "healthy-2",
        name: "Grilled Salmon Salad",
        description: "Fresh Atlantic salmon on mixed greens with citrus vinaigrette",
        cents: 1699,
        image: "food/healthy-salmon.jpg",
        category: Category::Healthy,
        rating: 4.8,
        review_count: 167,
        is_veg: false,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Salmon", "Mixed Greens", "Cherry Tomatoes", "Citrus Dressing"],
        calories: 450,
        prep_time: "20-25 min",
    },
    Entry {
        id: "healthy-3",
        name: "Açaí Power Bowl",
        description: "Blended açaí, topped with granola, berries, and honey",
        cents: 1199,
        image: "food/healthy-acai.jpg",
        category: Category::Healthy,
        rating: 4.6,
        review_count: 198,
        is_veg: true,
        is_hot: false,
        is_bestseller: false,
        ingredients: &["Açaí", "Granola", "Mixed Berries", "Banana", "Honey"],
        calories: 380,
        prep_time: "10 min",
    },
];

impl Entry {
    fn to_item(&self) -> Result<CatalogItem, infra::ids::IdParseError> {
        Ok(CatalogItem {
            id: self.id.parse::<Id<CatalogItem>>()?,
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: Price::cents(self.cents),
            image: self.image.to_string(),
            category: self.category,
            rating: self.rating,
            review_count: self.review_count,
            is_veg: self.is_veg,
            is_hot: self.is_hot,
            is_bestseller: self.is_bestseller,
            ingredients: Some(self.ingredients.iter().map(|s| s.to_string()).collect()),
            calories: Some(self.calories),
            prep_time: Some(self.prep_time.to_string()),
        })
    }
}

pub(super) fn standard_items() -> Result<Vec<CatalogItem>, infra::ids::IdParseError> {
    ENTRIES.iter().map(Entry::to_item).collect()
}
