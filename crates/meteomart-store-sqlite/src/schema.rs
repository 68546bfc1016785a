//! SQL schema for the dimensional weather warehouse.
//!
//! A reset is a destructive full rebuild, not a migration: drop the fact
//! table first (it holds the foreign keys), then the dimensions, then create
//! in the reverse order so the fact table's constraints can bind. Surrogate
//! keys are `INTEGER PRIMARY KEY` rowid aliases, auto-assigned on insert and
//! restarting from 1 after a rebuild.

/// Full rebuild DDL; idempotent thanks to `DROP TABLE IF EXISTS`.
pub const RESET_SCHEMA: &str = "
DROP TABLE IF EXISTS weather_fact;
DROP TABLE IF EXISTS station_dim;
DROP TABLE IF EXISTS date_dim;

CREATE TABLE station_dim (
    StationID   INTEGER PRIMARY KEY,
    StationCode TEXT NOT NULL,
    Name        TEXT NOT NULL,
    Latitude    REAL,
    Longitude   REAL,
    Elevation   REAL,
    CountryCode TEXT CHECK (length(CountryCode) = 2)
);

CREATE TABLE date_dim (
    DateID  INTEGER PRIMARY KEY,
    \"Date\"  TEXT NOT NULL,     -- ISO 8601 calendar date
    Year    INTEGER NOT NULL,
    Month   INTEGER NOT NULL,
    Day     INTEGER NOT NULL
);

CREATE TABLE weather_fact (
    StationID INTEGER NOT NULL REFERENCES station_dim(StationID),
    DateID    INTEGER NOT NULL REFERENCES date_dim(DateID),
    PRCP REAL,
    TAVG REAL,
    TMAX REAL,
    TMIN REAL,
    SNWD REAL,
    PGTM REAL,
    SNOW REAL,
    WDFG REAL,
    WSFG REAL,
    PRIMARY KEY (StationID, DateID)
);
";

/// The star join — every column of every fact row with its dimensions.
pub const JOIN_QUERY: &str = "
SELECT f.StationID, f.DateID,
       s.StationCode, s.Name, s.Latitude, s.Longitude, s.Elevation,
       s.CountryCode,
       d.\"Date\", d.Year, d.Month, d.Day,
       f.PRCP, f.TAVG, f.TMAX, f.TMIN, f.SNWD, f.PGTM, f.SNOW, f.WDFG, f.WSFG
FROM weather_fact AS f
JOIN station_dim AS s ON s.StationID = f.StationID
JOIN date_dim    AS d ON d.DateID    = f.DateID
ORDER BY f.StationID, f.DateID
";
