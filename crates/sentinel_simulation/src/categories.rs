//! Категории тел (collision layers) и битовые маски
//!
//! ## Архитектура:
//! - **Category:** на каком слое находится тело (ровно один бит)
//! - **CategoryMask:** набор слоёв, участвующих в spatial query
//!
//! ## Слои:
//! - bit 0 (0b1 = 1): Default
//! - bit 1 (0b10 = 2): Agents (наблюдатели с VisionSensor)
//! - bit 2 (0b100 = 4): Targets (кого ищем)
//! - bit 3 (0b1000 = 8): Obstacles (стены, укрытия, блокируют LOS)
//! - bit 4 (0b10000 = 16): Environment (пол, террейн)
//!
//! Имена резолвятся один раз при загрузке конфига. Неизвестное имя это
//! `ConfigError::UnknownCategory`, а не молчаливая нулевая маска.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Default,
    Agent,
    Target,
    Obstacle,
    Environment,
}

impl Category {
    /// Статическая таблица имя → категория
    pub const ALL: [Category; 5] = [
        Category::Default,
        Category::Agent,
        Category::Target,
        Category::Obstacle,
        Category::Environment,
    ];

    pub const fn bits(self) -> u32 {
        match self {
            Category::Default => 0b1,
            Category::Agent => 0b10,
            Category::Target => 0b100,
            Category::Obstacle => 0b1000,
            Category::Environment => 0b1_0000,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::Default => "Default",
            Category::Agent => "Agent",
            Category::Target => "Target",
            Category::Obstacle => "Obstacle",
            Category::Environment => "Environment",
        }
    }

    /// Поиск по имени (case-sensitive, как в редакторе слоёв)
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|category| category.name() == name)
            .ok_or_else(|| ConfigError::UnknownCategory(name.to_string()))
    }

    pub const fn mask(self) -> CategoryMask {
        CategoryMask(self.bits())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Битовая маска категорий
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);

    pub const ALL: CategoryMask = CategoryMask(
        Category::Default.bits()
            | Category::Agent.bits()
            | Category::Target.bits()
            | Category::Obstacle.bits()
            | Category::Environment.bits(),
    );

    pub const fn from_bits(bits: u32) -> Self {
        CategoryMask(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bits() != 0
    }

    pub const fn union(self, other: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Резолв списка имён в маску; первое неизвестное имя → ошибка
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        names.iter().try_fold(CategoryMask::NONE, |mask, name| {
            Ok(mask | Category::from_name(name.as_ref())?)
        })
    }

    /// Имена категорий в маске (для логов)
    pub fn names(self) -> Vec<&'static str> {
        Category::ALL
            .into_iter()
            .filter(|category| self.contains(*category))
            .map(Category::name)
            .collect()
    }
}

impl From<Category> for CategoryMask {
    fn from(category: Category) -> Self {
        category.mask()
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        self.union(rhs)
    }
}

impl BitOr<Category> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: Category) -> CategoryMask {
        self.union(rhs.mask())
    }
}

impl BitOr for Category {
    type Output = CategoryMask;

    fn bitor(self, rhs: Category) -> CategoryMask {
        self.mask().union(rhs.mask())
    }
}

impl BitOrAssign for CategoryMask {
    fn bitor_assign(&mut self, rhs: CategoryMask) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct() {
        let mut seen = 0u32;
        for category in Category::ALL {
            assert_eq!(category.bits().count_ones(), 1);
            assert_eq!(seen & category.bits(), 0, "{} overlaps", category);
            seen |= category.bits();
        }
        assert_eq!(seen, CategoryMask::ALL.bits());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Category::from_name("Obstacle").unwrap(), Category::Obstacle);
        assert_eq!(Category::from_name("Target").unwrap(), Category::Target);
        assert!(matches!(
            Category::from_name("obstacle"),
            Err(ConfigError::UnknownCategory(name)) if name == "obstacle"
        ));
    }

    #[test]
    fn test_mask_from_names() {
        let mask = CategoryMask::from_names(&["Target", "Obstacle"]).unwrap();
        assert!(mask.contains(Category::Target));
        assert!(mask.contains(Category::Obstacle));
        assert!(!mask.contains(Category::Agent));
        assert_eq!(mask.names(), vec!["Target", "Obstacle"]);

        let empty: [&str; 0] = [];
        assert!(CategoryMask::from_names(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_name_fails_loudly() {
        let result = CategoryMask::from_names(&["Target", "Walls"]);
        assert!(matches!(result, Err(ConfigError::UnknownCategory(name)) if name == "Walls"));
    }

    #[test]
    fn test_mask_ops() {
        let mask = Category::Target | Category::Obstacle;
        assert_eq!(mask.bits(), 0b1100);

        let mut grown = CategoryMask::NONE;
        grown |= Category::Agent.mask();
        assert_eq!(grown | Category::Default, CategoryMask::from_bits(0b11));

        // Неизвестные биты отбрасываются
        assert_eq!(CategoryMask::from_bits(u32::MAX), CategoryMask::ALL);
    }
}
