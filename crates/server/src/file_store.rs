use async_trait::async_trait;
use chrono::Utc;
use showings::store::{self, ShowingTour, TourId, TourStore, sort_newest_first};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

/// One `<id>.json` file per tour.
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes read-modify-write on save
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self, store::Error> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path(&self, id: TourId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn read(&self, id: TourId) -> Result<Option<ShowingTour>, store::Error> {
        match fs::read(self.path(id)).await {
            Ok(bytes) => Ok(Some(decode(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

fn decode(bytes: &[u8]) -> Result<ShowingTour, store::Error> {
    serde_json::from_slice(bytes).map_err(|err| store::Error::Serde(err.to_string()))
}

#[async_trait]
impl TourStore for JsonFileStore {
    async fn save(&self, tour: ShowingTour) -> Result<TourId, store::Error> {
        let _guard = self.write_lock.lock().await;
        let previous = match tour.id {
            Some(id) => self.read(id).await?,
            None => None,
        };
        let tour = tour.prepare_save(previous.as_ref(), Utc::now())?;
        let id = tour
            .id
            .ok_or_else(|| store::Error::Invalid("missing id".into()))?;

        let bytes =
            serde_json::to_vec_pretty(&tour).map_err(|err| store::Error::Serde(err.to_string()))?;
        // Write next to the target and rename so readers never see half a file
        let tmp = self.dir.join(format!("{id}.json.tmp"));
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, self.path(id)).await?;
        debug!("Saved tour {id} to {}", self.dir.display());
        Ok(id)
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<ShowingTour>, store::Error> {
        let mut tours = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path).await?;
            match decode(&bytes) {
                Ok(tour) if &*tour.owner_id == owner_id => tours.push(tour),
                Ok(_) => {}
                Err(err) => warn!("Skipping unreadable tour file {}: {err}", path.display()),
            }
        }
        sort_newest_first(&mut tours);
        Ok(tours)
    }

    async fn get(&self, id: TourId) -> Result<ShowingTour, store::Error> {
        self.read(id).await?.ok_or(store::Error::NotFound(id))
    }

    async fn delete(&self, id: TourId) -> Result<(), store::Error> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(self.path(id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(store::Error::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showings::prelude::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("showings-store-{}", uuid::Uuid::new_v4()))
    }

    fn tour(owner: &str, name: &str) -> ShowingTour {
        ShowingTour::new(
            owner,
            name,
            vec![Stop::new("mls-1", "1 Main St", Coordinate::from((40.0, -74.0)))],
            TourConfig::new(Time::from_hm(10, 0), Time::from_hm(12, 0)),
        )
    }

    #[tokio::test]
    async fn save_get_delete() {
        let dir = scratch_dir();
        let store = JsonFileStore::open(&dir).await.unwrap();

        let id = store.save(tour("agent-1", "Sunday")).await.unwrap();
        let saved = store.get(id).await.unwrap();
        assert_eq!(saved.name, "Sunday");
        assert_eq!(saved.stops.len(), 1);

        store.delete(id).await.unwrap();
        assert!(matches!(store.get(id).await, Err(store::Error::NotFound(_))));
        assert!(matches!(store.delete(id).await, Err(store::Error::NotFound(_))));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = scratch_dir();
        let id = {
            let store = JsonFileStore::open(&dir).await.unwrap();
            store.save(tour("agent-1", "Sunday")).await.unwrap()
        };

        let store = JsonFileStore::open(&dir).await.unwrap();
        assert_eq!(store.list("agent-1").await.unwrap().len(), 1);
        assert_eq!(store.get(id).await.unwrap().id, Some(id));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn list_skips_other_owners_and_garbage() {
        let dir = scratch_dir();
        let store = JsonFileStore::open(&dir).await.unwrap();
        store.save(tour("agent-1", "Mine")).await.unwrap();
        store.save(tour("agent-2", "Theirs")).await.unwrap();
        std::fs::write(dir.join("broken.json"), b"{not json").unwrap();

        let mine = store.list("agent-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Mine");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn owner_is_checked_on_resave() {
        let dir = scratch_dir();
        let store = JsonFileStore::open(&dir).await.unwrap();
        let id = store.save(tour("agent-1", "Mine")).await.unwrap();

        let mut other = store.get(id).await.unwrap();
        other.owner_id = "agent-2".into();
        assert!(matches!(
            store.save(other).await,
            Err(store::Error::OwnerMismatch(_))
        ));

        let _ = std::fs::remove_dir_all(dir);
    }
}
