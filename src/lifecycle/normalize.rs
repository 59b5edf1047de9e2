use crate::lifecycle::OrderState;
use crate::types::{Course, OrderRecord, OwnedCourse};
use crate::units::from_smallest_unit;

/// Merge a catalog course with its on-chain order record into a
/// display-ready entity.
///
/// The record's smallest-unit price becomes a decimal string and the raw
/// state code becomes a label. Referentially transparent; the output is a
/// projection rebuilt on every read, never stored back.
pub fn normalize_owned_course(course: &Course, record: &OrderRecord) -> OwnedCourse {
    OwnedCourse {
        id: course.id.clone(),
        title: course.title.clone(),
        description: course.description.clone(),
        cover_image: course.cover_image.clone(),
        image: course.image.clone(),
        slug: course.slug.clone(),
        course_type: course.course_type.clone(),
        owned_course_id: record.id.clone(),
        proof: record.proof.clone(),
        owned: record.owner.clone(),
        price: from_smallest_unit(record.price),
        state: OrderState::from_code(record.state),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_owned_course;
    use crate::lifecycle::OrderState;
    use crate::types::{Course, OrderRecord};

    fn course() -> Course {
        Course {
            id: "c1".to_string(),
            title: "Practical Rust".to_string(),
            description: "Ownership without tears".to_string(),
            price: "14.99".to_string(),
            cover_image: "/img/c1-cover.png".to_string(),
            image: "/img/c1.png".to_string(),
            slug: "practical-rust".to_string(),
            course_type: "course".to_string(),
        }
    }

    fn record(state: i64) -> OrderRecord {
        OrderRecord {
            id: "0xorder".to_string(),
            owner: "0xabc".to_string(),
            proof: "0xproof".to_string(),
            price: 14_990_000_000_000_000_000,
            state,
        }
    }

    #[test]
    fn merges_course_and_record_fields() {
        let owned = normalize_owned_course(&course(), &record(0));
        assert_eq!(owned.id, "c1");
        assert_eq!(owned.owned_course_id, "0xorder");
        assert_eq!(owned.proof, "0xproof");
        assert_eq!(owned.owned, "0xabc");
        assert_eq!(owned.price, "14.99");
        assert_eq!(owned.state, Some(OrderState::Purchased));
    }

    #[test]
    fn every_known_code_gets_its_label() {
        let c = course();
        let labels: Vec<Option<OrderState>> = (0..=4)
            .map(|code| normalize_owned_course(&c, &record(code)).state)
            .collect();
        assert_eq!(
            labels,
            vec![
                Some(OrderState::Purchased),
                Some(OrderState::Activated),
                Some(OrderState::Deactivated),
                Some(OrderState::Delivered),
                Some(OrderState::Completed),
            ]
        );
    }

    #[test]
    fn unknown_code_yields_missing_label() {
        let owned = normalize_owned_course(&course(), &record(9));
        assert_eq!(owned.state, None);
    }

    #[test]
    fn is_referentially_transparent() {
        let a = normalize_owned_course(&course(), &record(2));
        let b = normalize_owned_course(&course(), &record(2));
        assert_eq!(a, b);
    }
}
