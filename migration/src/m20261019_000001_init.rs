use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== COUNTRIES ==========
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Countries::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Countries::Lat).double().not_null())
                    .col(ColumnDef::new(Countries::Lon).double().not_null())
                    .to_owned(),
            )
            .await?;

        // ========== CITIES ==========
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cities::CountryId).integer().not_null())
                    .col(ColumnDef::new(Cities::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Cities::Lat).double().not_null())
                    .col(ColumnDef::new(Cities::Lon).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_country")
                            .from(Cities::Table, Cities::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Same city name may appear once per country
        manager
            .create_index(
                Index::create()
                    .name("idx_cities_country_name")
                    .table(Cities::Table)
                    .col(Cities::CountryId)
                    .col(Cities::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ========== TEMPERATURES ==========
        manager
            .create_table(
                Table::create()
                    .table(Temperatures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Temperatures::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Temperatures::CityId).integer().not_null())
                    .col(ColumnDef::new(Temperatures::Value).double().not_null())
                    .col(
                        ColumnDef::new(Temperatures::Timestamp)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_temperatures_city")
                            .from(Temperatures::Table, Temperatures::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_temperatures_city_timestamp")
                    .table(Temperatures::Table)
                    .col(Temperatures::CityId)
                    .col(Temperatures::Timestamp)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Temperatures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
    Name,
    Lat,
    Lon,
}

#[derive(DeriveIden)]
enum Cities {
    Table,
    Id,
    CountryId,
    Name,
    Lat,
    Lon,
}

#[derive(DeriveIden)]
enum Temperatures {
    Table,
    Id,
    CityId,
    Value,
    Timestamp,
}
