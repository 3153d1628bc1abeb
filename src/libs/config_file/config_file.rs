use log::debug;
use std::path::{Path, PathBuf};

use crate::libs::fec_encoder::fec_encoder::FecEncoder;
use crate::libs::galois_field::galois_field::GaloisFieldKind;
use crate::libs::profile::profile::Profile;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Config {
    encoder: Encoder,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    profiles: Vec<Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Encoder {
    profile: String,
    #[serde(default)]
    galois_field: GaloisFieldKind,
}

const CONFIG_FILE_NAME: &str = "ao40fec.toml";
const DEFAULT_PROFILE: &str = "ao40-short";

pub struct ConfigurationStore {
    config_file_path: Box<Path>,
    config: Config,
}

impl ConfigurationStore {
    pub fn new(config_path: Box<Path>) -> Result<ConfigurationStore, String> {
        let mut config_file_path = PathBuf::new();
        config_file_path.push(config_path);
        config_file_path.push(CONFIG_FILE_NAME);
        debug!("Config file is {:?}", config_file_path);
        if !config_file_path.exists() {
            debug!("Creating config file {:?}", config_file_path);
            let config = Config {
                encoder: Encoder {
                    profile: DEFAULT_PROFILE.to_string(),
                    galois_field: GaloisFieldKind::default(),
                },
                profiles: vec![],
            };
            save_configuration(&config_file_path, &config)?;
            Ok(ConfigurationStore {
                config_file_path: config_file_path.into_boxed_path(),
                config,
            })
        } else {
            let config = read_configuration(&config_file_path)?;
            Ok(ConfigurationStore {
                config_file_path: config_file_path.into_boxed_path(),
                config,
            })
        }
    }

    pub fn get_config_file_path(&self) -> Box<Path> {
        self.config_file_path.clone()
    }

    pub fn get_profile_name(&self) -> String {
        self.config.encoder.profile.clone()
    }

    pub fn set_profile_name(&mut self, name: String) -> Result<(), String> {
        self.resolve_profile(&name)?;
        self.config.encoder.profile = name;
        self.save()
    }

    pub fn get_galois_field(&self) -> GaloisFieldKind {
        self.config.encoder.galois_field
    }

    pub fn set_galois_field(&mut self, galois_field: GaloisFieldKind) -> Result<(), String> {
        self.config.encoder.galois_field = galois_field;
        self.save()
    }

    pub fn get_custom_profiles(&self) -> Vec<Profile> {
        self.config.profiles.clone()
    }

    /// Stores a custom profile, replacing any custom profile of the same name.
    pub fn add_profile(&mut self, profile: Profile) -> Result<(), String> {
        profile.validate().map_err(|e| e.to_string())?;
        self.config.profiles.retain(|existing| existing.name != profile.name);
        self.config.profiles.push(profile);
        self.save()
    }

    /// The currently selected profile; custom profiles shadow built-in ones.
    pub fn get_profile(&self) -> Result<Profile, String> {
        self.resolve_profile(&self.config.encoder.profile)
    }

    pub fn create_encoder(&self) -> Result<FecEncoder, String> {
        let profile = self.get_profile()?;
        FecEncoder::new(profile, self.get_galois_field()).map_err(|e| e.to_string())
    }

    fn resolve_profile(&self, name: &str) -> Result<Profile, String> {
        if let Some(profile) = self.config.profiles.iter().find(|p| p.name == name) {
            return Ok(profile.clone());
        }
        match Profile::builtin(name) {
            Some(profile) => Ok(profile),
            None => Err(format!("No profile called '{}' in config file {:?}; built-in profiles are {}",
                                name, self.config_file_path, Profile::builtin_names().join(", "))),
        }
    }

    fn save(&self) -> Result<(), String> {
        save_configuration(&self.config_file_path.to_path_buf(), &self.config)
    }
}

fn save_configuration(config_file_path: &PathBuf, config: &Config) -> Result<(), String> {
    match toml::to_string(config) {
        Ok(toml) => {
            match std::fs::write(config_file_path, toml) {
                Ok(_) => Ok(()),
                Err(e) => Err(format!("Could not write config file {:?}: {}", config_file_path, e)),
            }
        }
        Err(err) => Err(format!("Could not serialise configuration for {:?}: {}", config_file_path, err)),
    }
}

fn read_configuration(config_file_path: &PathBuf) -> Result<Config, String> {
    let file_contents = std::fs::read_to_string(config_file_path);
    match file_contents {
        Ok(toml) => {
            let x: Result<Config, toml::de::Error> = toml::from_str(&toml);
            match x {
                Ok(config) => {
                    debug!("Read config file {:?}", config_file_path);
                    Ok(config)
                }
                Err(err) => {
                    Err(format!("Could not parse config file {:?}: {}", config_file_path, err))
                }
            }
        }
        Err(e) => { Err(format!("Could not read config file {:?}: {}", config_file_path, e)) }
    }
}

#[cfg(test)]
#[path = "./config_file_spec.rs"]
mod config_file_spec;
