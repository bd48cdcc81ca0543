//! Static part-name catalogue backing the autocomplete endpoint.
//!
//! The suggestion endpoint matches case-insensitive substrings over this
//! fixed list of common listing names. No ranking and no fuzzy matching;
//! entries are returned in catalogue order up to the requested limit.

pub const COMMON_PART_NAMES: &[&str] = &[
    "Двигатель в сборе",
    "Коробка передач (АКПП)",
    "Коробка передач (МКПП)",
    "ГБЦ в сборе",
    "Турбина",
    "Генератор",
    "Стартер",
    "Радиатор охлаждения",
    "Радиатор кондиционера",
    "Вентилятор охлаждения",
    "Топливный насос",
    "Форсунка топливная",
    "Катализатор",
    "Глушитель",
    "Коллектор впускной",
    "Коллектор выпускной",
    "Термостат",
    "Помпа (водяной насос)",
    "Сцепление в сборе",
    "Диск сцепления",
    "Корзина сцепления",
    "Маховик",
    "ШРУС наружный",
    "ШРУС внутренний",
    "Полуось левая",
    "Полуось правая",
    "Карданный вал",
    "Амортизатор передний",
    "Амортизатор задний",
    "Стойка амортизатора",
    "Пружина подвески",
    "Рычаг передний нижний",
    "Ступица передняя",
    "Ступица задняя",
    "Шаровая опора",
    "Стабилизатор поперечной устойчивости",
    "Рулевая рейка",
    "Насос ГУР",
    "Суппорт тормозной передний",
    "Суппорт тормозной задний",
    "Тормозной диск передний",
    "Тормозной диск задний",
    "Тормозные колодки",
    "Главный тормозной цилиндр",
    "Аккумулятор",
    "Катушка зажигания",
    "Блок предохранителей",
    "Блок управления двигателем (ЭБУ)",
    "Датчик кислорода (лямбда-зонд)",
    "Датчик АБС",
    "Стеклоподъемник передний левый",
    "Трапеция стеклоочистителя",
    "Моторчик печки",
    "Капот",
    "Крыло переднее левое",
    "Крыло переднее правое",
    "Бампер передний",
    "Бампер задний",
    "Дверь передняя левая",
    "Дверь передняя правая",
    "Дверь задняя левая",
    "Дверь задняя правая",
    "Крышка багажника",
    "Лобовое стекло",
    "Фара левая",
    "Фара правая",
    "Фонарь задний левый",
    "Фонарь задний правый",
    "Зеркало левое",
    "Зеркало правое",
    "Решетка радиатора",
    "Руль",
    "Сиденье водителя",
    "Сиденье пассажира",
    "Панель приборов",
    "Подушка безопасности водителя",
    "Ремень безопасности передний",
    "Литой диск R16",
    "Колпак колеса",
];

/// Case-insensitive substring match over the catalogue.
///
/// A blank query yields no suggestions rather than the whole catalogue.
#[must_use]
pub fn suggest(query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    COMMON_PART_NAMES
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(limit)
        .map(|name| (*name).to_string())
        .collect()
}
