use crate::model::Backstory;

/// Regular backstories by id, then named ones by full name and slot.
pub fn order_backstories(stories: Vec<Backstory>) -> Vec<Backstory> {
    let (mut solid, mut regular): (Vec<_>, Vec<_>) =
        stories.into_iter().partition(Backstory::is_solid);

    regular.sort_by(|a, b| a.id.cmp(&b.id));
    solid.sort_by(|a, b| full_name(a).cmp(&full_name(b)).then(a.slot.cmp(&b.slot)));

    regular.extend(solid);
    regular
}

fn full_name(b: &Backstory) -> String {
    format!(
        "{}{}",
        b.first_name.as_deref().unwrap_or_default(),
        b.last_name.as_deref().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BackstorySlot;

    fn regular(id: &str) -> Backstory {
        Backstory {
            id: id.into(),
            ..Backstory::default()
        }
    }

    fn named(first: &str, last: &str, slot: BackstorySlot) -> Backstory {
        Backstory {
            id: format!("{first}{slot}"),
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            slot,
            ..Backstory::default()
        }
    }

    #[test]
    fn regular_first_then_named() {
        let ordered = order_backstories(vec![
            named("Zed", "Ab", BackstorySlot::Adulthood),
            regular("Medic2"),
            named("Ann", "Bo", BackstorySlot::Adulthood),
            named("Ann", "Bo", BackstorySlot::Childhood),
            regular("Farmer9"),
        ]);
        let ids: Vec<&str> = ordered.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["Farmer9", "Medic2", "AnnChildhood", "AnnAdulthood", "ZedAdulthood"]
        );
    }
}
