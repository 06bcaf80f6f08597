//! Built-in exercise catalogue seeded into every store.

use crate::types::Exercise;

/// Bumped whenever the built-in list changes; key-value backends reseed when
/// their stored version is older.
pub const CATALOG_VERSION: u32 = 4;

pub const CATALOG_LEN: usize = BUILTIN.len();

// (name, muscle group); ids are assigned 1.. in this order.
const BUILTIN: [(&str, &str); 72] = [
    ("Жим лежа", "Грудь"),
    ("Жим лежа под углом", "Грудь"),
    ("Жим лежа головой вниз", "Грудь"),
    ("Жим гантелей лежа", "Грудь"),
    ("Жим гантелей под углом", "Грудь"),
    ("Отжимания на брусьях", "Грудь"),
    ("Разводка гантелей", "Грудь"),
    ("Разводка гантелей под углом", "Грудь"),
    ("Жим в тренажере", "Грудь"),
    ("Сведение в кроссовере", "Грудь"),
    ("Жим в машине Смита", "Грудь"),
    ("Баттерфляй (Пек-дек)", "Грудь"),
    ("Становая тяга", "Спина"),
    ("Становая тяга сумо", "Спина"),
    ("Румынская тяга", "Спина"),
    ("Подтягивания", "Спина"),
    ("Подтягивания широким хватом", "Спина"),
    ("Подтягивания узким хватом", "Спина"),
    ("Тяга штанги в наклоне", "Спина"),
    ("Тяга гантели в наклоне", "Спина"),
    ("Т-тяга", "Спина"),
    ("Шраги со штангой", "Спина"),
    ("Шраги с гантелями", "Спина"),
    ("Тяга верхнего блока", "Спина"),
    ("Тяга горизонтального блока", "Спина"),
    ("Рычажная тяга", "Спина"),
    ("Гиперэкстензия", "Спина"),
    ("Приседания со штангой", "Ноги"),
    ("Фронтальные приседания", "Ноги"),
    ("Приседания с гантелями", "Ноги"),
    ("Гоблет приседания", "Ноги"),
    ("Выпады со штангой", "Ноги"),
    ("Выпады с гантелями", "Ноги"),
    ("Болгарские приседания", "Ноги"),
    ("Жим ногами", "Ноги"),
    ("Хакк-приседания", "Ноги"),
    ("Разгибание ног", "Ноги"),
    ("Сгибание ног", "Ноги"),
    ("Подъемы на носки стоя", "Ноги"),
    ("Подъемы на носки сидя", "Ноги"),
    ("Жим штанги стоя", "Плечи"),
    ("Жим штанги сидя", "Плечи"),
    ("Жим гантелей сидя", "Плечи"),
    ("Жим гантелей стоя", "Плечи"),
    ("Жим Арнольда", "Плечи"),
    ("Разводка гантелей в стороны", "Плечи"),
    ("Разводка гантелей в наклоне", "Плечи"),
    ("Подъемы гантелей перед собой", "Плечи"),
    ("Тяга штанги к подбородку", "Плечи"),
    ("Жим в тренажере для плеч", "Плечи"),
    ("Обратная разводка в тренажере", "Плечи"),
    ("Подъемы штанги на бицепс", "Руки"),
    ("Подъемы EZ-штанги", "Руки"),
    ("Подъемы гантелей на бицепс", "Руки"),
    ("Молотки с гантелями", "Руки"),
    ("Концентрированные подъемы", "Руки"),
    ("Подъемы на скамье Скотта", "Руки"),
    ("Подъемы на бицепс в кроссовере", "Руки"),
    ("Жим узким хватом", "Руки"),
    ("Французский жим лежа", "Руки"),
    ("Французский жим сидя", "Руки"),
    ("Французский жим с EZ-штангой", "Руки"),
    ("Жим гантели из-за головы", "Руки"),
    ("Разгибание рук в блоке", "Руки"),
    ("Разгибание руки в наклоне", "Руки"),
    ("Отжимания на брусьях", "Руки"),
    ("Скручивания с весом", "Пресс"),
    ("Скручивания на блоке", "Пресс"),
    ("Подъемы ног в висе", "Пресс"),
    ("Подъемы коленей в висе", "Пресс"),
    ("Русские повороты с весом", "Пресс"),
    ("Планка с весом", "Пресс"),
];

pub fn default_exercises() -> Vec<Exercise> {
    BUILTIN
        .iter()
        .zip(1..)
        .map(|(&(name, muscle_group), id)| Exercise {
            id,
            name: name.to_string(),
            muscle_group: muscle_group.to_string(),
            is_custom: false,
        })
        .collect()
}
