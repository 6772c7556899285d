use serde::Serialize;

use crate::db::Data;
use crate::models::{Car, Client, Service};

pub const MAX_HITS: usize = 10;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: i64,
    pub text: String,
    pub entity: SearchEntity,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SearchEntity {
    Client(Client),
    Car(Car),
    Service(Service),
}

/// Case-insensitive substring search over clients (name, phone), car plates
/// and service names, in that order.
pub fn search(data: &Data, query: &str) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

    let clients = data
        .clients
        .iter()
        .filter(|c| hit(&c.name) || hit(&c.phone))
        .map(|c| SearchHit {
            kind: "client",
            id: c.id,
            text: c.name.clone(),
            entity: SearchEntity::Client(c.clone()),
        });

    let cars = data.cars.iter().filter(|c| hit(&c.plate)).map(|c| SearchHit {
        kind: "car",
        id: c.id,
        text: format!("{} — {} {}", c.plate, c.brand, c.model),
        entity: SearchEntity::Car(c.clone()),
    });

    let services = data.services.iter().filter(|s| hit(&s.name)).map(|s| SearchHit {
        kind: "service",
        id: s.id,
        text: s.name.clone(),
        entity: SearchEntity::Service(s.clone()),
    });

    clients.chain(cars).chain(services).take(MAX_HITS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Data {
        Data {
            clients: vec![
                Client {
                    id: 1,
                    name: "Иван Петров".to_string(),
                    phone: "+79991112233".to_string(),
                    email: String::new(),
                    preferences: String::new(),
                },
                Client {
                    id: 2,
                    name: "Мария Соколова".to_string(),
                    phone: "+79003332211".to_string(),
                    email: String::new(),
                    preferences: String::new(),
                },
            ],
            cars: vec![Car {
                id: 1,
                client_ids: vec![1],
                plate: "А123ВС".to_string(),
                brand: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: Some(2020),
                body_type: "седан".to_string(),
            }],
            services: vec![Service {
                id: 1,
                name: "Ручная мойка".to_string(),
                kind: "мойка".to_string(),
                price: 800.0,
            }],
            ..Data::default()
        }
    }

    #[test]
    fn test_empty_query() {
        assert!(search(&sample(), "").is_empty());
        assert!(search(&sample(), "   ").is_empty());
    }

    #[test]
    fn test_case_insensitive_name() {
        let hits = search(&sample(), "иван");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, "client");
        assert_eq!(hits[0].text, "Иван Петров");
    }

    #[test]
    fn test_phone_and_plate() {
        assert_eq!(search(&sample(), "3332211")[0].id, 2);

        let hits = search(&sample(), "а123");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "А123ВС — Toyota Camry");
    }

    #[test]
    fn test_hits_capped() {
        let mut data = sample();
        data.clients = (1..=15)
            .map(|id| Client {
                id,
                name: format!("Клиент {id}"),
                phone: String::new(),
                email: String::new(),
                preferences: String::new(),
            })
            .collect();
        assert_eq!(search(&data, "клиент").len(), MAX_HITS);
    }

    #[test]
    fn test_serialized_hit() {
        let json = serde_json::to_value(search(&sample(), "мойка")).unwrap();
        assert_eq!(json[0]["type"], "service");
        assert_eq!(json[0]["entity"]["type"], "мойка");
        assert_eq!(json[0]["entity"]["price"], 800.0);
    }
}
