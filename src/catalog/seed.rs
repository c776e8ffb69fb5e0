use uuid::Uuid;

use super::model::{CuisineCategory, Difficulty, MealType, NutritionalInfo, Recipe};

#[allow(clippy::too_many_arguments)]
fn recipe(
    name: &str,
    cuisine: &str,
    cuisine_category: CuisineCategory,
    meal_type: MealType,
    difficulty: Difficulty,
    prep_time: u32,
    cook_time: u32,
    servings: u32,
    ingredients: &[&str],
    steps: &[&str],
    nutritional_info: NutritionalInfo,
) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        name: name.into(),
        cuisine: cuisine.into(),
        cuisine_category,
        meal_type,
        difficulty,
        prep_time,
        cook_time,
        total_time: prep_time + cook_time,
        servings,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        nutritional_info,
    }
}

/// Built-in catalog used when the `recipes` key is empty at startup.
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "كشري",
            "مصر",
            CuisineCategory::Arab,
            MealType::Lunch,
            Difficulty::Easy,
            20,
            40,
            4,
            &[
                "أرز",
                "عدس أسود",
                "مكرونة",
                "حمص",
                "بصل مقلي",
                "صلصة طماطم",
                "خل وثوم",
            ],
            &[
                "اسلق العدس حتى ينضج.",
                "اطبخ الأرز والمكرونة كلاً على حدة.",
                "حضّر صلصة الطماطم بالخل والثوم.",
                "اخلط المكونات وقدّمها مع البصل المقلي.",
            ],
            NutritionalInfo {
                calories: 520,
                protein: 18.0,
                carbs: 95.0,
                fat: 8.0,
                sugar: 6.0,
            },
        ),
        recipe(
            "كبسة الدجاج",
            "السعودية",
            CuisineCategory::Arab,
            MealType::Lunch,
            Difficulty::Medium,
            25,
            50,
            6,
            &[
                "دجاج كامل مقطع",
                "أرز بسمتي",
                "بصل",
                "طماطم",
                "بهارات الكبسة",
                "ليمون أسود",
            ],
            &[
                "حمّر البصل ثم أضف الدجاج والبهارات.",
                "أضف الطماطم والماء واترك الدجاج ينضج.",
                "أضف الأرز واطبخه على نار هادئة.",
                "قدّم الكبسة مع الدقوس.",
            ],
            NutritionalInfo {
                calories: 640,
                protein: 38.0,
                carbs: 72.0,
                fat: 21.0,
                sugar: 4.0,
            },
        ),
        recipe(
            "منسف",
            "الأردن",
            CuisineCategory::Arab,
            MealType::Dinner,
            Difficulty::Hard,
            30,
            90,
            8,
            &[
                "لحم خروف",
                "جميد",
                "أرز",
                "خبز شراك",
                "لوز وصنوبر",
                "سمن بلدي",
            ],
            &[
                "اسلق اللحم حتى يقارب النضج.",
                "ذوّب الجميد وأضفه إلى اللحم واتركه يغلي.",
                "اطبخ الأرز وافرده فوق خبز الشراك.",
                "رتّب اللحم واسكب الجميد وزيّن باللوز.",
            ],
            NutritionalInfo {
                calories: 780,
                protein: 45.0,
                carbs: 68.0,
                fat: 34.0,
                sugar: 3.0,
            },
        ),
        recipe(
            "شكشوكة",
            "تونس",
            CuisineCategory::Arab,
            MealType::Breakfast,
            Difficulty::Easy,
            10,
            15,
            2,
            &["بيض", "طماطم", "فلفل أخضر", "بصل", "زيت زيتون", "كمون"],
            &[
                "اقلِ البصل والفلفل في زيت الزيتون.",
                "أضف الطماطم واتركها حتى تتسبك.",
                "اكسر البيض فوق الصلصة وغطِّ المقلاة حتى ينضج.",
            ],
            NutritionalInfo {
                calories: 310,
                protein: 14.0,
                carbs: 12.0,
                fat: 22.0,
                sugar: 7.0,
            },
        ),
        recipe(
            "كنافة نابلسية",
            "فلسطين",
            CuisineCategory::Arab,
            MealType::Desserts,
            Difficulty::Medium,
            20,
            25,
            10,
            &["عجينة كنافة", "جبنة نابلسية", "سمن", "قطر", "فستق حلبي"],
            &[
                "افرد نصف العجينة في الصينية وضع الجبنة فوقها.",
                "غطِّ الجبنة بباقي العجينة واخبزها حتى تتحمر.",
                "اسكب القطر فور خروجها وزيّن بالفستق.",
            ],
            NutritionalInfo {
                calories: 450,
                protein: 11.0,
                carbs: 52.0,
                fat: 23.0,
                sugar: 30.0,
            },
        ),
        recipe(
            "بيتزا مارغريتا",
            "إيطالي",
            CuisineCategory::International,
            MealType::Dinner,
            Difficulty::Medium,
            90,
            15,
            4,
            &[
                "دقيق",
                "خميرة",
                "صلصة طماطم",
                "جبنة موزاريلا",
                "ريحان طازج",
                "زيت زيتون",
            ],
            &[
                "اعجن العجينة واتركها تختمر.",
                "افرد العجينة وادهنها بالصلصة.",
                "وزّع الموزاريلا واخبزها في فرن حار.",
                "زيّنها بالريحان قبل التقديم.",
            ],
            NutritionalInfo {
                calories: 560,
                protein: 22.0,
                carbs: 70.0,
                fat: 20.0,
                sugar: 8.0,
            },
        ),
        recipe(
            "دجاج بالزبدة",
            "هندي",
            CuisineCategory::International,
            MealType::Dinner,
            Difficulty::Medium,
            30,
            35,
            4,
            &[
                "صدور دجاج",
                "زبدة",
                "كريمة طبخ",
                "معجون طماطم",
                "غارام ماسالا",
                "زنجبيل وثوم",
            ],
            &[
                "تبّل الدجاج واتركه ساعة على الأقل.",
                "اشوِ الدجاج ثم حضّر الصلصة بالزبدة والطماطم.",
                "أضف الكريمة والدجاج واتركه على نار هادئة.",
            ],
            NutritionalInfo {
                calories: 610,
                protein: 36.0,
                carbs: 18.0,
                fat: 42.0,
                sugar: 9.0,
            },
        ),
        recipe(
            "تيراميسو",
            "إيطالي",
            CuisineCategory::International,
            MealType::Desserts,
            Difficulty::Easy,
            30,
            0,
            8,
            &[
                "جبنة ماسكاربوني",
                "بسكويت سافوياردي",
                "قهوة إسبريسو",
                "بيض",
                "سكر",
                "كاكاو",
            ],
            &[
                "اخفق الصفار مع السكر ثم أضف الماسكاربوني.",
                "اغمس البسكويت في القهوة ورتّبه في الصينية.",
                "بادل الطبقات وضعها في الثلاجة أربع ساعات.",
                "رش الكاكاو قبل التقديم.",
            ],
            NutritionalInfo {
                calories: 420,
                protein: 8.0,
                carbs: 38.0,
                fat: 26.0,
                sugar: 24.0,
            },
        ),
    ]
}

#[cfg(test)]
mod seed_tests {
    use super::*;

    #[test]
    fn test_sample_catalog_is_consistent() {
        let recipes = sample_recipes();
        assert!(!recipes.is_empty());

        for r in &recipes {
            assert_eq!(r.total_time, r.prep_time + r.cook_time, "{}", r.name);
            assert!(!r.ingredients.is_empty(), "{}", r.name);
            assert!(!r.steps.is_empty(), "{}", r.name);
        }

        let mut ids: Vec<_> = recipes.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), recipes.len());
    }
}
