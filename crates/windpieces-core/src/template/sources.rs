//! Canonical file contents emitted into generated projects

/// `src/app.ts` before any module has run
pub const APP_SOURCE: &str = r#"import express from "express";
import morgan from "morgan";
import routes from "./routes";

const app = express();

app.use(express.json(), express.urlencoded({ extended: true }));
app.use(morgan("dev"));
app.use(routes);
/*CORSCONFIG*/

export { app };
"#;

/// `.env` before any module has run
pub const ENV_SOURCE: &str = r#"DATABASE_URL=""
PORT=3000
#CORS_CONFIG
"#;

/// Replaces the app token when cross-origin support is selected
pub const CORS_MIDDLEWARE: &str = r#"import cors from "cors";

const corsOptions = process.env.CORS_ORIGIN?.split(",") ?? "*";

app.use(
  cors({
    origin: corsOptions,
    optionsSuccessStatus: 200,
  }),
);"#;

/// Replaces the env token when cross-origin support is selected
pub fn cors_env_assignment(origins: &[String]) -> String {
    format!("CORS_ORIGIN={}", origins.join(","))
}

/// `src/server.ts` without a document database
pub const SERVER_SOURCE: &str = r#"import "dotenv/config";
import { app } from "@/app";
import { magenta } from "colorette";

const PORT = process.env.PORT || 3000;

app.listen(PORT, async () => {
  console.log("-".repeat(80) + "\n");
  console.log(magenta("Server is running on http://localhost:" + PORT + "\n"));
  console.log("-".repeat(80) + "\n");
});
"#;

/// `src/server.ts` connecting to MongoDB before serving
pub const SERVER_SOURCE_DOCUMENT_DATABASE: &str = r#"import "dotenv/config";
import { app } from "@/app";
import { magenta } from "colorette";
import ConnectionMongoDB from "@/database/connection_mongodb";

const PORT = process.env.PORT || 3000;

app.listen(PORT, async () => {
  await ConnectionMongoDB();
  console.log("-".repeat(80) + "\n");
  console.log(magenta("Server is running on http://localhost:" + PORT + "\n"));
  console.log("-".repeat(80) + "\n");
});
"#;

pub const DOCKERFILE: &str = r#"FROM node:alpine

WORKDIR /usr/app

COPY package*.json ./
RUN npm install
COPY . .

CMD ["npm", "start"]
"#;

pub const DOCKERIGNORE: &str = r#"node_modules
.eslint.json
.gitignore
.prettierrc.json
"#;

pub const DOCKER_COMPOSE: &str = r#"version: "3.1"

services:
  app:
    build: .
    command: "npm start"
    restart: always
    networks:
      - app-network

networks:
  app-network:
    driver: bridge
"#;

/// `src/database/connection_mongodb.ts`
pub const MONGO_CONNECTION: &str = r#"import mongoose from "mongoose";

const main = async () => {
  try {
    await mongoose.connect(process.env.DATABASE_URL as string);
    console.log("MongoDB is connected");
  } catch (error) {
    console.log(error);
  }
};

export default main;
"#;

/// `src/models/example.ts`
pub const MONGO_EXAMPLE_MODEL: &str = r#"import mongoose from "mongoose";

// this is an example of a model

const ExampleSchema = new mongoose.Schema({
  name: {
    type: String,
    required: true,
  },
  tag: {
    type: String,
    unique: true,
    required: true,
  },
  office: {
    type: String,
    enum: ["owner", "tenant", "union"],
    required: true,
  },
  vehicle: [
    {
      type: {
        type: String,
        enum: ["car", "motorcycle"],
      },
      plate: String,
      brand: String,
    },
  ],
  hasAnimal: {
    type: Boolean,
    default: false,
  },
  visitors: [
    {
      type: Object,
      required: true,
      name: String,
      cpf: String,
      cep: String,
    },
  ],
});

export default mongoose.model<typeof ExampleSchema>("example", ExampleSchema);
"#;

/// `src/database/prismaClient.ts`
pub const PRISMA_CLIENT: &str = r#"import { PrismaClient } from "@prisma/client";

const prismaClient: PrismaClient = new PrismaClient();

export default prismaClient;
"#;
