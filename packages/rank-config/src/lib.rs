mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Aggregation, Config, Postgres, Resource, Service, Snapshot, Storage};

use std::{fs, net::SocketAddr, path::Path};

const MAX_PAGE_SIZE: u32 = 10_000;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
		("aggregation.feed_id", &cfg.aggregation.feed_id),
		("aggregation.resource.collection", &cfg.aggregation.resource.collection),
		("aggregation.resource.key", &cfg.aggregation.resource.key),
		("aggregation.snapshot.collection", &cfg.aggregation.snapshot.collection),
		("aggregation.snapshot.key", &cfg.aggregation.snapshot.key),
	] {
		if value.is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	let admin_addr: SocketAddr = cfg.service.admin_bind.parse().map_err(|_| Error::Validation {
		message: "service.admin_bind must be a socket address.".to_string(),
	})?;

	if !admin_addr.ip().is_loopback() {
		return Err(Error::Validation {
			message: "service.admin_bind must be a loopback address.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.aggregation.page_size == 0 || cfg.aggregation.page_size > MAX_PAGE_SIZE {
		return Err(Error::Validation {
			message: format!("aggregation.page_size must be in the range 1-{MAX_PAGE_SIZE}."),
		});
	}
	if cfg.aggregation.refresh_interval_seconds == 0 {
		return Err(Error::Validation {
			message: "aggregation.refresh_interval_seconds must be greater than zero.".to_string(),
		});
	}
	if !(0..=2).contains(&cfg.aggregation.snapshot.permission_read) {
		return Err(Error::Validation {
			message: "aggregation.snapshot.permission_read must be in the range 0-2.".to_string(),
		});
	}
	if !(0..=1).contains(&cfg.aggregation.snapshot.permission_write) {
		return Err(Error::Validation {
			message: "aggregation.snapshot.permission_write must be in the range 0-1.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for value in [
		&mut cfg.service.http_bind,
		&mut cfg.service.admin_bind,
		&mut cfg.service.log_level,
		&mut cfg.storage.postgres.dsn,
		&mut cfg.aggregation.feed_id,
		&mut cfg.aggregation.resource.collection,
		&mut cfg.aggregation.resource.key,
		&mut cfg.aggregation.snapshot.collection,
		&mut cfg.aggregation.snapshot.key,
	] {
		let trimmed = value.trim();

		if trimmed.len() != value.len() {
			*value = trimmed.to_string();
		}
	}
}
