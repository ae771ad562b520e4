//! Static restaurant lexicon.
//!
//! Every table is evaluated top to bottom and the first hit wins, so entry order is
//! part of the behavior.

/// A coarse dish category and the canonical ingredients it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DishCategory {
    pub name: &'static str,
    pub ingredients: &'static [&'static str],
}

pub const DISH_CATEGORIES: &[DishCategory] = &[
    DishCategory {
        name: "burger",
        ingredients: &[
            "bun", "buns", "beef", "beef patty", "patty", "cheese", "lettuce", "tomato", "onion",
            "pickles", "ketchup", "mustard", "mayo", "oil", "salt", "pepper",
        ],
    },
    DishCategory {
        name: "omelet",
        ingredients: &["eggs", "butter", "salt", "pepper", "water", "cheese", "vegetables"],
    },
    DishCategory {
        name: "egg omelet",
        ingredients: &["eggs", "butter", "salt", "pepper", "water", "cheese", "vegetables"],
    },
    DishCategory {
        name: "mushroom salad",
        ingredients: &[
            "mushrooms", "olive oil", "lemon juice", "salt", "pepper", "parsley", "parmesan",
        ],
    },
    DishCategory {
        name: "pizza",
        ingredients: &["flour", "yeast", "water", "salt", "olive oil", "tomato", "cheese", "basil"],
    },
    DishCategory {
        name: "lemon juice",
        ingredients: &["lemon", "water", "sugar", "salt"],
    },
    DishCategory {
        name: "pasta",
        ingredients: &["flour", "eggs", "salt", "olive oil", "tomato", "cheese"],
    },
    DishCategory {
        name: "salad",
        ingredients: &["lettuce", "tomato", "cucumber", "olive oil", "vinegar", "salt"],
    },
    DishCategory {
        name: "soup",
        ingredients: &["vegetables", "broth", "salt", "pepper", "herbs"],
    },
    DishCategory {
        name: "cake",
        ingredients: &["flour", "sugar", "eggs", "milk", "butter", "baking powder"],
    },
    DishCategory {
        name: "bread",
        ingredients: &["flour", "yeast", "water", "salt", "sugar"],
    },
    DishCategory {
        name: "rice",
        ingredients: &["rice", "water", "salt", "butter"],
    },
    DishCategory {
        name: "chicken",
        ingredients: &["chicken", "oil", "salt", "pepper", "herbs"],
    },
    DishCategory {
        name: "fish",
        ingredients: &["fish", "oil", "salt", "pepper", "lemon"],
    },
    DishCategory {
        name: "beef",
        ingredients: &["beef", "oil", "salt", "pepper", "garlic"],
    },
    DishCategory {
        name: "pork",
        ingredients: &["pork", "oil", "salt", "pepper", "garlic"],
    },
];

/// Used when a dish resolves to no category at all.
pub const GENERIC_INGREDIENTS: &[&str] = &[
    "flour", "salt", "oil", "water", "eggs", "milk", "sugar", "herbs",
];

/// Food phrases recognized by direct containment when no extraction pattern matched.
pub const FOOD_LEXICON: &[&str] = &[
    "lemon juice",
    "pizza",
    "pasta",
    "salad",
    "soup",
    "cake",
    "bread",
    "rice",
    "chicken",
    "fish",
    "beef",
    "pork",
    "burger",
    "mushroom salad",
];

const OMELET_RECIPE: &str = "Classic Egg Omelet Recipe:
1. Whisk 3 eggs with 1 tbsp water and a pinch of salt and pepper
2. Melt 1 tbsp butter in a non-stick pan over medium heat
3. Pour in the eggs and leave them to set for about 30 seconds
4. Spread fillings (cheese, vegetables, ham) over one half
5. Fold the other half over and cook 1-2 minutes more
6. Slide onto a warm plate and serve straight away";

/// Basic recipes served when no generator or lookup result is available.
pub const BASIC_RECIPES: &[(&str, &str)] = &[
    (
        "burger",
        "Classic Burger Recipe:
1. Season 1 lb ground beef with 1 tsp salt, 1/2 tsp pepper and 1/2 tsp garlic powder
2. Shape into 4 even patties and press a shallow dent into each centre
3. Bring an oiled pan or grill to medium-high heat
4. Cook the patties 4-5 minutes per side for medium-rare
5. Lay cheese on top during the last minute if wanted
6. Toast the buns and build with lettuce, tomato, onion and pickles
7. Finish with ketchup, mustard and mayo",
    ),
    (
        "pizza",
        "Pizza Recipe:
1. Combine 3 cups flour, 1 tsp yeast, 1 cup warm water, 1 tsp salt and 1 tbsp olive oil
2. Knead for 10 minutes, then let the dough rise for 1 hour
3. Roll it out and top with tomato sauce, cheese and toppings
4. Bake at 450°F (230°C) for 12-15 minutes until golden",
    ),
    ("omelet", OMELET_RECIPE),
    ("egg omelet", OMELET_RECIPE),
    (
        "lemon juice",
        "Lemon Juice Recipe:
1. Wash 4-6 lemons and roll them on the counter to loosen the juice
2. Halve the lemons and squeeze them with a juicer or by hand
3. Strain through a fine sieve to catch seeds and pulp
4. Stir in water and sugar to taste (roughly 1:1)
5. Serve over ice",
    ),
    (
        "pasta",
        "Basic Pasta Recipe:
1. Boil 1 lb pasta in salted water until al dente (8-10 minutes)
2. Drain, keeping back 1 cup of the cooking water
3. Toss with olive oil, garlic, salt and pepper
4. Loosen with some of the reserved water if needed
5. Finish with grated cheese and fresh herbs",
    ),
    (
        "cake",
        "Basic Cake Recipe:
1. Mix 2 cups flour, 1 cup sugar, 1 tsp baking powder and 1/2 tsp salt
2. Beat in 2 eggs, 1/2 cup milk and 1/3 cup oil
3. Pour into a greased 9x9 pan
4. Bake at 350°F (175°C) for 25-30 minutes
5. Cool completely before frosting",
    ),
    (
        "bread",
        "Basic Bread Recipe:
1. Mix 3 cups flour, 1 tsp yeast, 1 tsp salt and 1 tbsp sugar
2. Add 1 cup warm water and knead for 10 minutes
3. Let rise 1 hour, knock back and shape
4. Prove 30 minutes more, then bake at 400°F (200°C) for 30 minutes",
    ),
    (
        "mushroom salad",
        "Simple Mushroom Salad Recipe:
1. Clean and slice 8 oz fresh mushrooms
2. Dress with 2 tbsp olive oil, 1 tbsp lemon juice, salt and pepper
3. Fold in 1/4 cup chopped parsley and 2 tbsp grated parmesan
4. Marinate for 15 minutes and serve chilled",
    ),
];

/// First basic recipe whose key is contained in `dish`, in table order.
pub fn basic_recipe_for(dish: &str) -> Option<&'static str> {
    let dish = dish.to_lowercase();
    BASIC_RECIPES
        .iter()
        .find(|(key, _)| dish.contains(key))
        .map(|(_, recipe)| *recipe)
}

/// Generic advice for dishes the lexicon does not know.
pub fn generic_cooking_tips(dish: &str) -> String {
    format!(
        "Basic Cooking Tips for {dish}:
1. Start with fresh, quality ingredients
2. Follow proper food safety practices
3. Season to taste with salt and pepper
4. Cook at appropriate temperatures
5. Let food rest before serving
6. Taste as you cook and adjust seasoning"
    )
}
