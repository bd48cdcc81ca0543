//! Part category inference.
//!
//! Listings arrive with free-text Russian names ("Амортизатор передний
//! левый", "КПП механика"). When the client does not pick a category, the
//! name is lowercased and scanned against a flat keyword table, bucket by
//! bucket in a fixed order; the first bucket containing a matching substring
//! wins and anything unmatched falls back to [`PartCategory::Other`].
//!
//! The table is data entry, not linguistics. Keywords are chosen so the
//! common listing phrasings land in the right bucket; genuinely ambiguous
//! names ("Коврик багажника") resolve by scan order.

use crate::models::part::PartCategory;

const ENGINE: &[&str] = &[
    "двигатель",
    "двс",
    "мотор",
    "гбц",
    "головка блока",
    "блок цилиндров",
    "поршень",
    "коленвал",
    "распредвал",
    "турбина",
    "турбокомпрессор",
    "форсунка",
    "инжектор",
    "карбюратор",
    "дроссель",
    "тнвд",
    "бензонасос",
    "топливный насос",
    "масляный насос",
    "водяной насос",
    "помпа",
    "радиатор",
    "термостат",
    "коллектор",
    "глушитель",
    "катализатор",
    "свеча",
    "ремень грм",
    "цепь грм",
    "маховик",
    "картер",
    "поддон",
    "абсорбер",
];

const TRANSMISSION: &[&str] = &[
    "коробка передач",
    "кпп",
    "акпп",
    "мкпп",
    "вариатор",
    "сцеплен",
    "выжимной",
    "гидротрансформатор",
    "дифференциал",
    "редуктор",
    "раздатка",
    "раздаточная",
    "кардан",
    "полуось",
    "привод",
    "шрус",
    "граната",
    "кулиса",
];

const SUSPENSION: &[&str] = &[
    "подвеска",
    "амортизатор",
    "стойка",
    "пружина",
    "рессора",
    "рычаг",
    "сайлентблок",
    "шаровая",
    "ступица",
    "стабилизатор",
    "втулка",
    "тяга",
    "наконечник",
    "рейка",
    "гур",
    "гидроусилитель",
    "пневмо",
    "поворотный кулак",
    "балка",
    "подрамник",
    "опора",
];

const BRAKES: &[&str] = &[
    "тормоз",
    "суппорт",
    "колодк",
    "абс",
    "гтц",
    "вакуумный усилитель",
    "ручник",
    "стояночн",
    "барабан",
];

const ELECTRICAL: &[&str] = &[
    "генератор",
    "стартер",
    "аккумулятор",
    "акб",
    "катушка",
    "проводка",
    "жгут",
    "предохранител",
    "реле",
    "датчик",
    "лямбда",
    "замок зажигания",
    "эбу",
    "блок управления",
    "иммобилайзер",
    "стеклоподъемник",
    "стеклоочиститель",
    "трапеция",
    "омыватель",
    "вентилятор",
    "кондиционер",
    "магнитола",
    "динамик",
    "сигнал",
];

const BODY: &[&str] = &[
    "кузов",
    "капот",
    "крыло",
    "бампер",
    "дверь",
    "дверца",
    "багажник",
    "порог",
    "лонжерон",
    "крыша",
    "стекло",
    "четверть",
    "телевизор",
    "днище",
    "арка",
    "лючок",
];

const INTERIOR: &[&str] = &[
    "салон",
    "сидень",
    "кресло",
    "торпед",
    "панель приборов",
    "приборная панель",
    "щиток приборов",
    "руль",
    "обшивка",
    "обивка",
    "потолок",
    "коврик",
    "подлокотник",
    "ремень безопасности",
    "подушка безопасности",
    "airbag",
    "бардачок",
    "печка",
    "отопитель",
    "консоль",
];

const EXTERIOR: &[&str] = &[
    "фара",
    "фонарь",
    "оптика",
    "птф",
    "противотуман",
    "поворотник",
    "зеркало",
    "молдинг",
    "решетка",
    "спойлер",
    "брызговик",
    "подкрылок",
    "колпак",
    "колесный диск",
    "литой диск",
    "шина",
    "покрышка",
    "колесо",
    "дворник",
    "ручка",
    "эмблема",
    "накладка",
];

/// Buckets in scan order. First match wins, so narrower electrical terms
/// ("стеклоподъемник") sit before the broad body terms ("стекло") that would
/// otherwise shadow them.
const BUCKETS: &[(PartCategory, &[&str])] = &[
    (PartCategory::Engine, ENGINE),
    (PartCategory::Transmission, TRANSMISSION),
    (PartCategory::Suspension, SUSPENSION),
    (PartCategory::Brakes, BRAKES),
    (PartCategory::Electrical, ELECTRICAL),
    (PartCategory::Body, BODY),
    (PartCategory::Interior, INTERIOR),
    (PartCategory::Exterior, EXTERIOR),
];

/// Infer a category from a free-text part name.
#[must_use]
pub fn infer_category(name: &str) -> PartCategory {
    let lowered = name.to_lowercase();
    for (category, keywords) in BUCKETS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *category;
        }
    }
    PartCategory::Other
}
